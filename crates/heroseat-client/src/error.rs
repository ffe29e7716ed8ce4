//! Error types for the session state machine.
//!
//! Strongly-typed rejections for operations the machine refuses in its
//! current state. Transport-level problems never appear here; they surface
//! through [`crate::LinkMonitor`] states instead.

use thiserror::Error;

use crate::session::SessionPhase;

/// Errors that can occur during session state machine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Operation not valid in the current phase
    #[error("invalid operation: cannot {operation} while {phase:?}")]
    Phase {
        /// Current phase when the error occurred
        phase: SessionPhase,
        /// Operation that was attempted
        operation: String,
    },

    /// A submitted action is still awaiting its snapshot
    #[error("an action is already awaiting the next snapshot")]
    ActionInFlight,

    /// The held snapshot offers no wager-bounded move
    #[error("no wager range is active in the current snapshot")]
    NoWagerRange,
}

impl SessionError {
    /// Returns true if this error clears on its own and the operation may
    /// succeed on retry.
    ///
    /// A pending action resolves with the next snapshot (or the submit
    /// timeout); phase violations and missing wager ranges do not change
    /// by retrying.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ActionInFlight)
    }
}
