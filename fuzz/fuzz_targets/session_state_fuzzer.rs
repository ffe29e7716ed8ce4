//! Fuzz target for the Session state machine
//!
//! Drives a session with arbitrary operation sequences and time steps.
//!
//! # Invariants
//!
//! - No operation sequence panics; invalid operations return errors
//! - The round counter never decreases
//! - A wager selection exists exactly when the snapshot carries bounds

#![no_main]

use std::time::{Duration, Instant};

use arbitrary::Arbitrary;
use heroseat_client::{Session, SessionConfig};
use heroseat_proto::{
    ActionKind, Chips, GameSnapshot, GameStatus, LegalMove, ServerMessage, TableState,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
enum SessionOp {
    Join,
    ReplyFound { min: i32, max: i32, bounded: bool },
    ReplyMissing,
    Push { min: i32, max: i32, bounded: bool },
    SelectWager { amount: i32 },
    Submit,
    AdvanceRound,
    Tick { millis: u16 },
    Quit,
}

fn snapshot(min: i32, max: i32, bounded: bool) -> GameSnapshot {
    let legal_moves = if bounded {
        vec![
            LegalMove::bounded(ActionKind::Raise, Chips(i64::from(min)), Chips(i64::from(max))),
            LegalMove::plain(ActionKind::Fold),
        ]
    } else {
        vec![LegalMove::plain(ActionKind::Call), LegalMove::plain(ActionKind::Fold)]
    };

    GameSnapshot {
        status: GameStatus::InProgress,
        bot: Default::default(),
        last_message: Some(TableState { legal_moves, ..TableState::default() }),
    }
}

fuzz_target!(|ops: Vec<SessionOp>| {
    let mut session: Session<Instant> = Session::new("fuzz".into(), SessionConfig::default());
    let mut now = Instant::now();

    for op in ops {
        let round_before = session.round();

        match op {
            SessionOp::Join => {
                let _ = session.join();
            },
            SessionOp::ReplyFound { min, max, bounded } => {
                let msg = ServerMessage::JoinReply(Some(snapshot(min, max, bounded)));
                let _ = session.handle_message(msg, now);
            },
            SessionOp::ReplyMissing => {
                let _ = session.handle_message(ServerMessage::JoinReply(None), now);
            },
            SessionOp::Push { min, max, bounded } => {
                let msg = ServerMessage::GameUpdate(snapshot(min, max, bounded));
                let _ = session.handle_message(msg, now);
            },
            SessionOp::SelectWager { amount } => {
                let _ = session.select_wager(Chips(i64::from(amount)));
            },
            SessionOp::Submit => {
                let _ = session.submit(ActionKind::Raise, now);
            },
            SessionOp::AdvanceRound => {
                let _ = session.advance_round(now);
            },
            SessionOp::Tick { millis } => {
                now += Duration::from_millis(u64::from(millis));
                let _ = session.tick(now);
            },
            SessionOp::Quit => {
                let _ = session.quit();
            },
        }

        assert!(session.round() >= round_before, "round counter went backwards");

        let (min_bound, max_bound) = session.wager_bounds();
        assert_eq!(
            min_bound.is_some(),
            max_bound.is_some(),
            "wager bounds must come as a pair"
        );
        assert_eq!(
            session.wager().is_some(),
            min_bound.is_some(),
            "wager selection must exist exactly when bounds do"
        );
    }
});
