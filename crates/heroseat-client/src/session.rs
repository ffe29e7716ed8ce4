//! Game session state machine.
//!
//! Manages the join handshake, snapshot ingestion, wager bounds, action
//! submission, heartbeats, and the round counter for one game session.
//! Uses the action pattern: methods take time as input and return actions
//! for the driver to execute. This keeps the state machine pure (no I/O)
//! and makes testing straightforward.
//!
//! # State Machine
//!
//! ```text
//! ┌───────────┐  join    ┌─────────┐   join_reply    ┌────────┐
//! │ NotJoined │─────────>│ Joining │────────────────>│ Joined │
//! └───────────┘          └─────────┘                 └────────┘
//!                                                         │
//!                                   game_update / tick    │ (loops)
//!                                                         ↺
//! ```
//!
//! The server's own game status lives inside the snapshot and is
//! independent of this local progression. A joined session whose game was
//! never found holds no snapshot at all; that is a valid display state,
//! not a fault.

use std::{
    ops::Sub,
    time::{Duration, Instant},
};

use heroseat_proto::{
    ActionKind, Chips, ClientMessage, GameId, GameSnapshot, LegalMove, PlayerAction, ServerMessage,
};

use crate::error::SessionError;

/// Interval between liveness pings while joined.
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(2);

/// Delay between requesting the next hand and bumping the round counter.
pub const DEFAULT_ROUND_ADVANCE_DELAY: Duration = Duration::from_millis(500);

/// Time after which a pending action submission stops blocking new ones.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Actions returned by the session state machine.
///
/// The driver (test harness or production runtime) executes these actions:
/// - `Send`: Encode and send the message over the transport
/// - `Leave`: Tear the session down and navigate away
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Send this message to the server
    Send(ClientMessage),

    /// Tear down and navigate away from the session view
    Leave,
}

/// Local join progression, independent of the server-side game status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Initial state - no join request sent
    NotJoined,
    /// Join request sent, waiting for the reply
    Joining,
    /// Join reply received (with or without a game)
    Joined,
}

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Interval between liveness pings
    pub heartbeat_interval: Duration,
    /// Delay before the round counter visibly advances
    pub round_advance_delay: Duration,
    /// How long a submitted action blocks further submissions
    pub submit_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
            round_advance_delay: DEFAULT_ROUND_ADVANCE_DELAY,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }
}

/// Game session state machine
///
/// Owns the local view of one game: the held snapshot, the derived wager
/// bounds and selection, the round counter, and the heartbeat schedule.
///
/// This is a pure state machine - no I/O, no timers of its own. Time is
/// passed as parameters to the methods that need it.
///
/// Generic over `Instant` to support both real time and synthetic time for
/// deterministic testing.
#[derive(Debug, Clone)]
pub struct Session<I = Instant>
where
    I: Copy + Ord + Send + Sync + Sub<Output = Duration>,
{
    /// Identifier of the game this session is bound to
    game_id: GameId,
    /// Configuration
    config: SessionConfig,
    /// Local join progression
    phase: SessionPhase,
    /// Most recent snapshot; replaced wholesale, never merged
    game: Option<GameSnapshot>,
    /// Smallest allowed wager derived from the held snapshot
    min_wager: Option<Chips>,
    /// Largest allowed wager derived from the held snapshot
    max_wager: Option<Chips>,
    /// Currently selected wager
    wager: Option<Chips>,
    /// Client-local round counter, for display continuity
    round: u32,
    /// When the pending round advance was requested
    round_advance_from: Option<I>,
    /// When the pending action submission was made
    submitted_at: Option<I>,
    /// Heartbeat anchor: armed by the join reply, re-armed by each ping
    last_ping: Option<I>,
}

impl<I> Session<I>
where
    I: Copy + Ord + Send + Sync + Sub<Output = Duration>,
{
    /// Create a new session bound to one game, in
    /// [`SessionPhase::NotJoined`] state.
    pub fn new(game_id: GameId, config: SessionConfig) -> Self {
        Self {
            game_id,
            config,
            phase: SessionPhase::NotJoined,
            game: None,
            min_wager: None,
            max_wager: None,
            wager: None,
            round: 1,
            round_advance_from: None,
            submitted_at: None,
            last_ping: None,
        }
    }

    /// The game this session is bound to.
    #[must_use]
    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    /// Current join progression.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The held snapshot. `None` before the first reply, and forever if
    /// the game was not found.
    #[must_use]
    pub fn game(&self) -> Option<&GameSnapshot> {
        self.game.as_ref()
    }

    /// Derived wager bounds from the held snapshot. `(None, None)` when no
    /// legal move carries bounds.
    #[must_use]
    pub fn wager_bounds(&self) -> (Option<Chips>, Option<Chips>) {
        (self.min_wager, self.max_wager)
    }

    /// Currently selected wager. `None` whenever no bounds are active.
    #[must_use]
    pub fn wager(&self) -> Option<Chips> {
        self.wager
    }

    /// Client-local round counter. Starts at 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Whether a submitted action is still awaiting the next snapshot.
    #[must_use]
    pub fn action_in_flight(&self) -> bool {
        self.submitted_at.is_some()
    }

    /// Send the one join request for this session.
    ///
    /// Transitions to Joining and returns the join message. The heartbeat
    /// stays unarmed until the reply arrives, so a nonexistent game is
    /// never pinged.
    ///
    /// # Errors
    ///
    /// - `SessionError::Phase` if a join was already sent
    pub fn join(&mut self) -> Result<Vec<SessionAction>, SessionError> {
        if self.phase != SessionPhase::NotJoined {
            return Err(SessionError::Phase {
                phase: self.phase,
                operation: "join".to_string(),
            });
        }

        self.phase = SessionPhase::Joining;

        Ok(vec![SessionAction::Send(ClientMessage::JoinGame { game_id: self.game_id.clone() })])
    }

    /// Process an incoming server message.
    ///
    /// The join reply and every pushed update funnel a snapshot through the
    /// same application routine, so arrival order at this client is the
    /// only order: a push racing a still-in-flight join reply is legal and
    /// the later arrival wins.
    ///
    /// # Errors
    ///
    /// - `SessionError::Phase` on a join reply when none is outstanding
    pub fn handle_message(
        &mut self,
        msg: ServerMessage,
        now: I,
    ) -> Result<Vec<SessionAction>, SessionError> {
        match msg {
            ServerMessage::JoinReply(reply) => {
                if self.phase != SessionPhase::Joining {
                    return Err(SessionError::Phase {
                        phase: self.phase,
                        operation: "handle_join_reply".to_string(),
                    });
                }

                self.phase = SessionPhase::Joined;
                // Arm the heartbeat whether or not the game was found; the
                // interval is anchored here, so the first ping comes one
                // full interval after the reply.
                self.last_ping = Some(now);

                if let Some(snapshot) = reply {
                    self.apply_snapshot(snapshot);
                }

                Ok(vec![])
            },

            ServerMessage::GameUpdate(snapshot) => {
                self.apply_snapshot(snapshot);
                Ok(vec![])
            },
        }
    }

    /// Adjust the selected wager, clamped to the derived bounds.
    ///
    /// Returns the effective selection.
    ///
    /// # Errors
    ///
    /// - `SessionError::NoWagerRange` if the held snapshot offers no
    ///   wager-bounded move
    pub fn select_wager(
        &mut self,
        amount: Chips,
    ) -> Result<Chips, SessionError> {
        let (Some(min), Some(max)) = (self.min_wager, self.max_wager) else {
            return Err(SessionError::NoWagerRange);
        };

        let selected = amount.max(min).min(max);
        self.wager = Some(selected);
        Ok(selected)
    }

    /// Submit the player's move.
    ///
    /// Sends the chosen kind with the current wager attached; the server
    /// reads the amount only for the wager-bounded kind. Nothing local
    /// changes beyond the pending latch: the visible state stays on the
    /// held snapshot until the server pushes the resulting one.
    ///
    /// # Errors
    ///
    /// - `SessionError::Phase` if not joined
    /// - `SessionError::ActionInFlight` if an earlier submission is still
    ///   awaiting its snapshot and the timeout has not elapsed
    pub fn submit(
        &mut self,
        kind: ActionKind,
        now: I,
    ) -> Result<Vec<SessionAction>, SessionError> {
        if self.phase != SessionPhase::Joined {
            return Err(SessionError::Phase {
                phase: self.phase,
                operation: "submit".to_string(),
            });
        }

        if let Some(at) = self.submitted_at {
            if now - at < self.config.submit_timeout {
                return Err(SessionError::ActionInFlight);
            }
        }

        self.submitted_at = Some(now);

        let action = PlayerAction { kind, amount: self.wager };
        Ok(vec![SessionAction::Send(ClientMessage::GameAction {
            game_id: self.game_id.clone(),
            action,
        })])
    }

    /// Request the next hand and schedule the round counter bump.
    ///
    /// Fire-and-forget: the counter advances after the configured delay on
    /// a later [`Session::tick`], whether or not the server ever responds.
    /// The delay lets the resolved-hand display linger before the label
    /// changes. Calling again before the bump restarts the delay.
    ///
    /// # Errors
    ///
    /// - `SessionError::Phase` if not joined
    pub fn advance_round(&mut self, now: I) -> Result<Vec<SessionAction>, SessionError> {
        if self.phase != SessionPhase::Joined {
            return Err(SessionError::Phase {
                phase: self.phase,
                operation: "advance_round".to_string(),
            });
        }

        self.round_advance_from = Some(now);

        Ok(vec![SessionAction::Send(ClientMessage::NextHand { game_id: self.game_id.clone() })])
    }

    /// Leave the game.
    ///
    /// Fire-and-forget: the quit message goes out and the leave action
    /// follows immediately, with no acknowledgement relied upon. Quitting
    /// must succeed from the user's perspective even on a degraded link,
    /// so this never fails; the driver is expected to tear the session
    /// down on [`SessionAction::Leave`].
    pub fn quit(&mut self) -> Vec<SessionAction> {
        vec![
            SessionAction::Send(ClientMessage::QuitGame { game_id: self.game_id.clone() }),
            SessionAction::Leave,
        ]
    }

    /// Process periodic maintenance (heartbeat, round bump, latch expiry).
    ///
    /// Call this on every timer tick. The driver stops ticking at
    /// teardown, which is what ends the heartbeat: the machine itself
    /// never outlives its driver.
    pub fn tick(&mut self, now: I) -> Vec<SessionAction> {
        let mut actions = Vec::new();

        // Expire the pending-submit latch
        if let Some(at) = self.submitted_at {
            if now - at >= self.config.submit_timeout {
                self.submitted_at = None;
            }
        }

        // Bump the round counter once its delay has passed
        if let Some(from) = self.round_advance_from {
            if now - from >= self.config.round_advance_delay {
                self.round_advance_from = None;
                self.round += 1;
            }
        }

        // Heartbeat, armed by the join reply
        if self.phase == SessionPhase::Joined {
            if let Some(armed) = self.last_ping {
                if now - armed >= self.config.heartbeat_interval {
                    self.last_ping = Some(now);
                    actions.push(SessionAction::Send(ClientMessage::GamePing {
                        game_id: self.game_id.clone(),
                    }));
                }
            }
        }

        actions
    }

    /// Replace the held snapshot and recompute everything derived from it.
    ///
    /// Last-write-wins: the previous snapshot is discarded entirely. The
    /// wager selection resets to the fresh minimum because a new snapshot
    /// means the betting state changed and a mid-adjustment amount is no
    /// longer meaningful. The round counter is never touched here.
    fn apply_snapshot(&mut self, snapshot: GameSnapshot) {
        let (min, max) = snapshot
            .last_message
            .as_ref()
            .map_or((None, None), |table| wager_bounds(&table.legal_moves));

        self.min_wager = min;
        self.max_wager = max;
        self.wager = min;
        self.game = Some(snapshot);
        // The submitted action is resolved by whatever arrives next.
        self.submitted_at = None;
    }
}

/// Scan a legal-move list for the wager-bounded move.
///
/// At most one move carries bounds; its `(min, max)` pair is the result.
/// A list without one (or a move carrying only half a range) yields
/// `(None, None)` and the selection affordance stays off.
fn wager_bounds(
    moves: &[LegalMove],
) -> (Option<Chips>, Option<Chips>) {
    moves
        .iter()
        .find(|mv| mv.min.is_some() && mv.max.is_some())
        .map_or((None, None), |mv| (mv.min, mv.max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use heroseat_proto::{BotIdentity, GameStatus, TablePhase, TableState};

    fn snapshot_with_moves(moves: Vec<LegalMove>) -> GameSnapshot {
        GameSnapshot {
            status: GameStatus::InProgress,
            bot: BotIdentity::default(),
            last_message: Some(TableState {
                status: Some(TablePhase::GetAction),
                legal_moves: moves,
                ..TableState::default()
            }),
        }
    }

    fn joined_session(t0: Instant) -> Session {
        let mut session = Session::new(GameId::from("g1"), SessionConfig::default());
        session.join().unwrap();
        session
            .handle_message(ServerMessage::JoinReply(Some(snapshot_with_moves(vec![]))), t0)
            .unwrap();
        session
    }

    #[test]
    fn join_lifecycle() {
        let t0 = Instant::now();
        let mut session = Session::new(GameId::from("g1"), SessionConfig::default());

        // Initial state
        assert_eq!(session.phase(), SessionPhase::NotJoined);
        assert!(session.game().is_none());
        assert_eq!(session.round(), 1);

        // Send join
        let actions = session.join().unwrap();
        assert_eq!(session.phase(), SessionPhase::Joining);
        assert_eq!(actions, vec![SessionAction::Send(ClientMessage::JoinGame {
            game_id: GameId::from("g1"),
        })]);

        // Receive the reply
        let reply = ServerMessage::JoinReply(Some(snapshot_with_moves(vec![])));
        let actions = session.handle_message(reply, t0).unwrap();
        assert_eq!(session.phase(), SessionPhase::Joined);
        assert!(session.game().is_some());
        assert!(actions.is_empty());
    }

    #[test]
    fn second_join_is_rejected() {
        let mut session: Session = Session::new(GameId::from("g1"), SessionConfig::default());
        session.join().unwrap();

        let err = session.join().unwrap_err();
        assert!(matches!(err, SessionError::Phase { phase: SessionPhase::Joining, .. }));

        // Still rejected once joined
        session
            .handle_message(ServerMessage::JoinReply(None), Instant::now())
            .unwrap();
        assert!(session.join().is_err());
    }

    #[test]
    fn not_found_reply_joins_with_no_game() {
        let t0 = Instant::now();
        let mut session: Session = Session::new(GameId::from("gone"), SessionConfig::default());
        session.join().unwrap();

        session.handle_message(ServerMessage::JoinReply(None), t0).unwrap();
        assert_eq!(session.phase(), SessionPhase::Joined);
        assert!(session.game().is_none());
        assert_eq!(session.wager_bounds(), (None, None));
    }

    #[test]
    fn unsolicited_join_reply_is_rejected() {
        let mut session: Session = Session::new(GameId::from("g1"), SessionConfig::default());
        let err = session
            .handle_message(ServerMessage::JoinReply(None), Instant::now())
            .unwrap_err();
        assert!(matches!(err, SessionError::Phase { phase: SessionPhase::NotJoined, .. }));
    }

    #[test]
    fn snapshot_derives_bounds_and_resets_selection() {
        let t0 = Instant::now();
        let mut session = joined_session(t0);

        let snap = snapshot_with_moves(vec![
            LegalMove::plain(ActionKind::Fold),
            LegalMove::bounded(ActionKind::Raise, Chips(5), Chips(50)),
        ]);
        session.handle_message(ServerMessage::GameUpdate(snap), t0).unwrap();

        assert_eq!(session.wager_bounds(), (Some(Chips(5)), Some(Chips(50))));
        assert_eq!(session.wager(), Some(Chips(5)));

        // Mid-adjustment selection is discarded by the next snapshot
        session.select_wager(Chips(30)).unwrap();
        let snap = snapshot_with_moves(vec![LegalMove::bounded(
            ActionKind::Bet,
            Chips(10),
            Chips(20),
        )]);
        session.handle_message(ServerMessage::GameUpdate(snap), t0).unwrap();
        assert_eq!(session.wager(), Some(Chips(10)));
    }

    #[test]
    fn snapshot_without_bounded_move_disables_selection() {
        let t0 = Instant::now();
        let mut session = joined_session(t0);

        let snap = snapshot_with_moves(vec![
            LegalMove::plain(ActionKind::Check),
            LegalMove::plain(ActionKind::Fold),
        ]);
        session.handle_message(ServerMessage::GameUpdate(snap), t0).unwrap();

        assert_eq!(session.wager_bounds(), (None, None));
        assert_eq!(session.wager(), None);
        assert!(matches!(session.select_wager(Chips(5)), Err(SessionError::NoWagerRange)));
    }

    #[test]
    fn select_wager_clamps_to_bounds() {
        let t0 = Instant::now();
        let mut session = joined_session(t0);
        let snap = snapshot_with_moves(vec![LegalMove::bounded(
            ActionKind::Raise,
            Chips(5),
            Chips(50),
        )]);
        session.handle_message(ServerMessage::GameUpdate(snap), t0).unwrap();

        assert_eq!(session.select_wager(Chips(2)).unwrap(), Chips(5));
        assert_eq!(session.select_wager(Chips(500)).unwrap(), Chips(50));
        assert_eq!(session.select_wager(Chips(30)).unwrap(), Chips(30));
        assert_eq!(session.wager(), Some(Chips(30)));
    }

    #[test]
    fn submit_sends_kind_with_selected_wager() {
        let t0 = Instant::now();
        let mut session = joined_session(t0);
        let snap = snapshot_with_moves(vec![
            LegalMove::bounded(ActionKind::Raise, Chips(2), Chips(100)),
            LegalMove::plain(ActionKind::Fold),
        ]);
        session.handle_message(ServerMessage::GameUpdate(snap), t0).unwrap();

        let actions = session.submit(ActionKind::Fold, t0).unwrap();
        assert_eq!(actions, vec![SessionAction::Send(ClientMessage::GameAction {
            game_id: GameId::from("g1"),
            action: PlayerAction { kind: ActionKind::Fold, amount: Some(Chips(2)) },
        })]);

        // No optimistic update: the held snapshot is untouched
        assert!(session.game().is_some());
        assert_eq!(session.wager_bounds(), (Some(Chips(2)), Some(Chips(100))));
    }

    #[test]
    fn submit_before_join_is_rejected() {
        let mut session: Session = Session::new(GameId::from("g1"), SessionConfig::default());
        let err = session.submit(ActionKind::Check, Instant::now()).unwrap_err();
        assert!(matches!(err, SessionError::Phase { .. }));
    }

    #[test]
    fn duplicate_submit_is_latched_until_next_snapshot() {
        let t0 = Instant::now();
        let mut session = joined_session(t0);

        session.submit(ActionKind::Check, t0).unwrap();
        assert!(session.action_in_flight());

        let err = session.submit(ActionKind::Check, t0).unwrap_err();
        assert!(matches!(err, SessionError::ActionInFlight));
        assert!(err.is_transient());

        // The next snapshot resolves the latch
        session
            .handle_message(ServerMessage::GameUpdate(snapshot_with_moves(vec![])), t0)
            .unwrap();
        assert!(!session.action_in_flight());
        assert!(session.submit(ActionKind::Check, t0).is_ok());
    }

    #[test]
    fn submit_latch_expires_after_timeout() {
        let t0 = Instant::now();
        let mut session = joined_session(t0);

        session.submit(ActionKind::Check, t0).unwrap();

        let t1 = t0 + Duration::from_secs(4);
        assert!(matches!(session.submit(ActionKind::Check, t1), Err(SessionError::ActionInFlight)));

        let t2 = t0 + Duration::from_secs(5);
        assert!(session.submit(ActionKind::Check, t2).is_ok());
    }

    #[test]
    fn tick_clears_expired_submit_latch() {
        let t0 = Instant::now();
        let mut session = joined_session(t0);
        session.submit(ActionKind::Check, t0).unwrap();

        session.tick(t0 + Duration::from_secs(4));
        assert!(session.action_in_flight());

        session.tick(t0 + Duration::from_secs(6));
        assert!(!session.action_in_flight());
    }

    #[test]
    fn round_advances_only_after_delay() {
        let t0 = Instant::now();
        let mut session = joined_session(t0);
        assert_eq!(session.round(), 1);

        let actions = session.advance_round(t0).unwrap();
        assert_eq!(actions, vec![SessionAction::Send(ClientMessage::NextHand {
            game_id: GameId::from("g1"),
        })]);
        assert_eq!(session.round(), 1);

        // Not yet
        session.tick(t0 + Duration::from_millis(200));
        assert_eq!(session.round(), 1);

        session.tick(t0 + Duration::from_millis(500));
        assert_eq!(session.round(), 2);

        // The bump fires once
        session.tick(t0 + Duration::from_secs(10));
        assert_eq!(session.round(), 2);
    }

    #[test]
    fn repeated_advance_restarts_the_delay() {
        let t0 = Instant::now();
        let mut session = joined_session(t0);

        session.advance_round(t0).unwrap();
        session.advance_round(t0 + Duration::from_millis(400)).unwrap();

        // 500ms after the first request but only 100ms after the second
        session.tick(t0 + Duration::from_millis(500));
        assert_eq!(session.round(), 1);

        session.tick(t0 + Duration::from_millis(900));
        assert_eq!(session.round(), 2);
    }

    #[test]
    fn pushed_snapshots_never_move_the_round_counter() {
        let t0 = Instant::now();
        let mut session = joined_session(t0);

        for _ in 0..5 {
            let snap = GameSnapshot {
                status: GameStatus::InProgress,
                bot: BotIdentity::default(),
                last_message: Some(TableState {
                    status: Some(TablePhase::RoundOver),
                    ..TableState::default()
                }),
            };
            session.handle_message(ServerMessage::GameUpdate(snap), t0).unwrap();
        }

        assert_eq!(session.round(), 1);
    }

    #[test]
    fn heartbeat_starts_one_interval_after_the_reply() {
        let t0 = Instant::now();
        let mut session: Session = Session::new(GameId::from("g1"), SessionConfig::default());
        session.join().unwrap();

        // Not armed while the join is outstanding
        assert!(session.tick(t0 + Duration::from_secs(10)).is_empty());

        session
            .handle_message(ServerMessage::JoinReply(Some(snapshot_with_moves(vec![]))), t0)
            .unwrap();

        // Armed, but the interval has not elapsed yet
        assert!(session.tick(t0 + Duration::from_secs(1)).is_empty());

        let actions = session.tick(t0 + Duration::from_secs(2));
        assert_eq!(actions, vec![SessionAction::Send(ClientMessage::GamePing {
            game_id: GameId::from("g1"),
        })]);

        // Re-armed by the ping it just sent
        assert!(session.tick(t0 + Duration::from_secs(3)).is_empty());
        assert_eq!(session.tick(t0 + Duration::from_secs(4)).len(), 1);
    }

    #[test]
    fn heartbeat_runs_even_when_the_game_was_not_found() {
        let t0 = Instant::now();
        let mut session: Session = Session::new(GameId::from("gone"), SessionConfig::default());
        session.join().unwrap();
        session.handle_message(ServerMessage::JoinReply(None), t0).unwrap();

        let actions = session.tick(t0 + Duration::from_secs(2));
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn quit_sends_and_leaves_immediately() {
        let t0 = Instant::now();
        let mut session = joined_session(t0);

        let actions = session.quit();
        assert_eq!(actions, vec![
            SessionAction::Send(ClientMessage::QuitGame { game_id: GameId::from("g1") }),
            SessionAction::Leave,
        ]);
    }
}
