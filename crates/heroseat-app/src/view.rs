//! Read-only projection of session state for display.

use std::ops::Sub;
use std::time::Duration;

use heroseat_client::{Session, SessionPhase};
use heroseat_proto::{Chips, GameSnapshot};

/// Snapshot of everything a renderer needs to draw the table.
///
/// Published by the session runtime whenever the underlying state changes.
/// Values are owned copies so the consumer never borrows runtime state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    /// Join progression of the session.
    pub phase: SessionPhase,
    /// Most recent game snapshot, if any has arrived.
    pub game: Option<GameSnapshot>,
    /// Smallest allowed wager for the current snapshot.
    pub min_wager: Option<Chips>,
    /// Largest allowed wager for the current snapshot.
    pub max_wager: Option<Chips>,
    /// Currently selected wager.
    pub wager: Option<Chips>,
    /// Client-local round counter.
    pub round: u32,
    /// Whether a submitted action is still awaiting the next snapshot.
    pub action_in_flight: bool,
    /// Set on the final view once the session has torn down.
    pub left: bool,
}

impl SessionView {
    /// Project the current state of a session.
    #[must_use]
    pub fn of<I>(session: &Session<I>) -> Self
    where
        I: Copy + Ord + Send + Sync + Sub<Output = Duration>,
    {
        let (min_wager, max_wager) = session.wager_bounds();
        Self {
            phase: session.phase(),
            game: session.game().cloned(),
            min_wager,
            max_wager,
            wager: session.wager(),
            round: session.round(),
            action_in_flight: session.action_in_flight(),
            left: false,
        }
    }
}
