//! Fuzz target for game snapshot deserialization
//!
//! Snapshots arrive with permissive defaults, so almost any JSON object
//! should decode. This fuzzer checks:
//! - No panics on malformed or hostile JSON
//! - Everything that decodes also re-encodes
//! - Decode(encode(x)) is identity for every reachable snapshot

#![no_main]

use heroseat_proto::GameSnapshot;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(snapshot) = serde_json::from_str::<GameSnapshot>(text) {
        let encoded = serde_json::to_string(&snapshot).expect("decoded snapshot must re-encode");
        let again: GameSnapshot =
            serde_json::from_str(&encoded).expect("re-encoded snapshot must decode");
        assert_eq!(snapshot, again, "snapshot round-trip diverged");
    }
});
