//! Transport health state machine.
//!
//! Folds raw connectivity signals from the transport into one of five
//! user-facing states. The monitor only classifies what the transport
//! reports; it performs no retries and triggers no network calls itself.
//!
//! # State Machine
//!
//! ```text
//!                      connect
//! ┌────────────┐ ─────────────────> ┌───────────┐
//! │ Connecting │                    │ Connected │
//! └────────────┘                    └───────────┘
//!       │                                 │
//!       │ connect_error                   │ disconnect
//!       ↓                                 ↓
//! ┌──────────────┐   reconnecting   ┌──────────────┐
//! │ Disconnected │ <──────────────> │ Reconnecting │
//! └──────────────┘                  └──────────────┘
//!       │                                 │
//!       │        reconnect_failed         │
//!       └───────────> ┌────────┐ <────────┘
//!                     │ Failed │  (absorbing)
//!                     └────────┘
//! ```

/// Raw connectivity signals emitted by the transport.
///
/// Mirrors the transport's own event names: one signal per callback a
/// socket layer registers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSignal {
    /// The transport established (or re-established) a connection.
    Connect,
    /// A connection attempt failed. Retrying transports emit one per
    /// attempt.
    ConnectError,
    /// An established connection dropped.
    Disconnect,
    /// The transport began a retry cycle.
    Reconnecting,
    /// The transport exhausted its retries and gave up.
    ReconnectFailed,
}

/// User-facing classification of transport health.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// First connection attempt underway.
    Connecting,
    /// Link established.
    Connected,
    /// Link lost, transport actively retrying.
    Reconnecting,
    /// Link lost, no retry in progress.
    Disconnected,
    /// Retries exhausted. Terminal: only a fresh monitor escapes it.
    Failed,
}

impl LinkState {
    /// Whether the link is currently usable.
    #[must_use]
    pub fn is_online(self) -> bool {
        self == Self::Connected
    }

    /// Whether this state absorbs all further signals.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::Failed
    }

    /// Status line shown to the user for this state.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Connecting => "Connecting...",
            Self::Connected => "Connected.",
            Self::Reconnecting => "Attempting to reconnect...",
            Self::Disconnected => "Connection lost.",
            Self::Failed => "Could not connect. Please refresh.",
        }
    }
}

/// Link health state machine.
///
/// Pure fold over [`LinkSignal`]s: no I/O, no timers. The driver feeds it
/// every signal the transport emits and publishes the returned state.
#[derive(Debug, Clone)]
pub struct LinkMonitor {
    state: LinkState,
}

impl LinkMonitor {
    /// Create a monitor for a transport that is either already open or
    /// still dialing.
    #[must_use]
    pub fn new(transport_open: bool) -> Self {
        let state = if transport_open { LinkState::Connected } else { LinkState::Connecting };
        Self { state }
    }

    /// Current classification.
    #[must_use]
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Fold one transport signal into the state and return the result.
    ///
    /// Total: every signal is legal in every state. `Failed` absorbs
    /// everything, and `ConnectError` is suppressed while `Reconnecting`
    /// so a retrying transport does not flicker the status between two
    /// states once per attempt.
    pub fn observe(&mut self, signal: LinkSignal) -> LinkState {
        self.state = match (self.state, signal) {
            // Nothing leaves Failed.
            (LinkState::Failed, _) => LinkState::Failed,
            (_, LinkSignal::Connect) => LinkState::Connected,
            (_, LinkSignal::Reconnecting) => LinkState::Reconnecting,
            // Per-attempt errors during a retry cycle stay invisible.
            (LinkState::Reconnecting, LinkSignal::ConnectError) => LinkState::Reconnecting,
            (_, LinkSignal::ConnectError | LinkSignal::Disconnect) => LinkState::Disconnected,
            (_, LinkSignal::ReconnectFailed) => LinkState::Failed,
        };
        self.state
    }
}
