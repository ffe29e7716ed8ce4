//! Async session runtime.
//!
//! Event loop that drives one [`Session`] against the transport channels.
//! Uses `tokio::select!` to handle server messages, player commands, and a
//! periodic tick concurrently. The session itself stays a pure state
//! machine; this loop feeds it time and I/O and republishes the resulting
//! [`SessionView`] whenever it changes.

use std::time::Duration;

use heroseat_client::{Session, SessionAction, SessionConfig, SessionError};
use heroseat_proto::{ActionKind, Chips, ClientMessage, GameId, ServerMessage};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::view::SessionView;

/// Cadence of the internal tick driving deadlines and the heartbeat.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Capacity of the player command channel.
const COMMAND_CAPACITY: usize = 16;

/// An input from the player, issued through the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Adjust the selected wager.
    SelectWager(Chips),
    /// Submit a move of this kind with the selected wager.
    Submit(ActionKind),
    /// Acknowledge a resolved hand and move the table on.
    AdvanceRound,
    /// Leave the game.
    Quit,
}

/// Handle to a running session task.
pub struct SessionRuntime {
    /// Player commands into the loop.
    commands: mpsc::Sender<PlayerCommand>,
    /// Abort handle to stop the session task.
    abort_handle: tokio::task::AbortHandle,
}

impl SessionRuntime {
    /// Spawn a session bound to one game.
    ///
    /// The task joins the game immediately, then runs until the player
    /// quits, the transport hangs up, or the handle is stopped. State
    /// changes are published on `views`; quitting publishes one final view
    /// carrying [`SessionView::left`] before the task ends.
    #[must_use]
    pub fn spawn(
        game_id: GameId,
        config: SessionConfig,
        to_server: mpsc::Sender<ClientMessage>,
        from_server: mpsc::Receiver<ServerMessage>,
        views: mpsc::Sender<SessionView>,
    ) -> Self {
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_CAPACITY);
        let session = Session::new(game_id, config);

        let handle =
            tokio::spawn(run_session(session, to_server, from_server, commands_rx, views));

        Self { commands: commands_tx, abort_handle: handle.abort_handle() }
    }

    /// A sender for player commands.
    #[must_use]
    pub fn commands(&self) -> mpsc::Sender<PlayerCommand> {
        self.commands.clone()
    }

    /// Stop the session task.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Drive the session until it leaves or the transport closes.
async fn run_session(
    mut session: Session<Instant>,
    to_server: mpsc::Sender<ClientMessage>,
    mut from_server: mpsc::Receiver<ServerMessage>,
    mut commands: mpsc::Receiver<PlayerCommand>,
    views: mpsc::Sender<SessionView>,
) {
    // Join as soon as the task is up. A fresh session cannot refuse this.
    match session.join() {
        Ok(actions) => {
            execute_actions(&to_server, actions).await;
        },
        Err(e) => {
            tracing::warn!("Failed to start join: {:?}", e);
        },
    }

    let mut published = SessionView::of(&session);
    let _ = views.send(published.clone()).await;

    let mut tick_interval = tokio::time::interval(TICK_INTERVAL);
    // The interval's first tick fires immediately; consume it so deadline
    // checks start one period out.
    tick_interval.tick().await;

    loop {
        let mut leaving = false;

        tokio::select! {
            // Replies and pushes from the server
            msg = from_server.recv() => {
                match msg {
                    Some(msg) => {
                        match session.handle_message(msg, Instant::now()) {
                            Ok(actions) => {
                                leaving = execute_actions(&to_server, actions).await;
                            },
                            Err(e) => {
                                tracing::warn!("Rejected server message: {:?}", e);
                            },
                        }
                    },
                    None => {
                        tracing::info!("Transport closed, shutting down session");
                        break;
                    },
                }
            }

            // Player commands
            cmd = commands.recv() => {
                match cmd {
                    Some(cmd) => {
                        match apply_command(&mut session, cmd) {
                            Ok(actions) => {
                                leaving = execute_actions(&to_server, actions).await;
                            },
                            Err(e) if e.is_transient() => {
                                tracing::debug!("Ignoring command: {:?}", e);
                            },
                            Err(e) => {
                                tracing::warn!("Rejected command: {:?}", e);
                            },
                        }
                    },
                    None => {
                        tracing::info!("Command channel closed, shutting down session");
                        break;
                    },
                }
            }

            // Periodic tick: deadlines and heartbeat
            _ = tick_interval.tick() => {
                let actions = session.tick(Instant::now());
                leaving = execute_actions(&to_server, actions).await;
            }
        }

        if leaving {
            // Nothing delivered from here on may mutate state
            drop(from_server);
            let mut view = SessionView::of(&session);
            view.left = true;
            let _ = views.send(view).await;
            return;
        }

        let view = SessionView::of(&session);
        if view != published {
            published = view.clone();
            let _ = views.send(view).await;
        }
    }
}

/// Feed one player command into the session.
fn apply_command(
    session: &mut Session<Instant>,
    cmd: PlayerCommand,
) -> Result<Vec<SessionAction>, SessionError> {
    match cmd {
        PlayerCommand::SelectWager(amount) => {
            session.select_wager(amount)?;
            Ok(Vec::new())
        },
        PlayerCommand::Submit(kind) => session.submit(kind, Instant::now()),
        PlayerCommand::AdvanceRound => session.advance_round(Instant::now()),
        PlayerCommand::Quit => Ok(session.quit()),
    }
}

/// Execute session actions. Returns true when the session should tear down.
async fn execute_actions(
    to_server: &mpsc::Sender<ClientMessage>,
    actions: Vec<SessionAction>,
) -> bool {
    let mut leave = false;

    for action in actions {
        match action {
            SessionAction::Send(msg) => {
                if let Err(e) = to_server.send(msg).await {
                    tracing::warn!("Failed to send message to server: {:?}", e);
                }
            },
            SessionAction::Leave => leave = true,
        }
    }

    leave
}
