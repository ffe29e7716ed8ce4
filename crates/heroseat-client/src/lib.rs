//! Client state machines
//!
//! Action-based state machines that keep a user's view of a two-party card
//! game session consistent with authoritative state pushed by the game
//! server, and classify transport health for display.
//!
//! # Architecture
//!
//! Both machines are Sans-IO: they receive events and time as inputs,
//! mutate only their own state, and return actions for the caller to
//! execute. Nothing here touches the network or schedules timers, which
//! keeps every transition deterministic and directly testable.
//!
//! # Components
//!
//! - [`LinkMonitor`]: Folds raw transport signals into user-facing
//!   connectivity states
//! - [`Session`]: Manages one game session: join, snapshots, wagers,
//!   submissions, heartbeats, round counter
//! - [`SessionAction`]: Actions produced by the session for its driver
//! - [`SessionError`]: Rejections for operations invalid in the current
//!   phase

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod link;
mod session;

pub use error::SessionError;
pub use link::{LinkMonitor, LinkSignal, LinkState};
pub use session::{
    DEFAULT_HEARTBEAT_INTERVAL, DEFAULT_ROUND_ADVANCE_DELAY, DEFAULT_SUBMIT_TIMEOUT, Session,
    SessionAction, SessionConfig, SessionPhase,
};
