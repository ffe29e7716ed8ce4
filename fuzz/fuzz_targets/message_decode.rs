//! Fuzz target for wire message decoding
//!
//! This fuzzer tests message decoding with arbitrary text to find:
//! - Parser crashes or panics
//! - Type confusion between event tags and payload shapes
//! - Recursion blowups on deeply nested JSON
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an error.

#![no_main]

use heroseat_proto::{ClientMessage, ServerMessage};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Both directions share the envelope shape; neither may panic
    let _ = ClientMessage::decode(text);
    let _ = ServerMessage::decode(text);
});
