//! Wire messages exchanged with the game server.
//!
//! Messages travel as JSON text tagged `{"event": ..., "data": ...}`, the
//! shape the server's socket layer frames events in. Transport-level framing
//! underneath is not this crate's concern.

use serde::{Deserialize, Serialize};

use crate::{
    error::ProtocolError,
    game::{GameId, GameSnapshot},
    moves::PlayerAction,
};

/// Client-to-server messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Join a game and subscribe to its updates. Answered by
    /// [`ServerMessage::JoinReply`].
    JoinGame {
        /// Game to join.
        game_id: GameId,
    },

    /// Liveness ping for a joined game. Fire-and-forget.
    GamePing {
        /// Game being kept alive.
        game_id: GameId,
    },

    /// Submit the player's move. The outcome arrives as a later
    /// [`ServerMessage::GameUpdate`], never as a direct reply.
    GameAction {
        /// Game the move belongs to.
        game_id: GameId,
        /// The move itself.
        action: PlayerAction,
    },

    /// Acknowledge a resolved hand and ask for the next one.
    NextHand {
        /// Game to advance.
        game_id: GameId,
    },

    /// Leave the game. Fire-and-forget; no acknowledgement is relied upon.
    QuitGame {
        /// Game being left.
        game_id: GameId,
    },
}

impl ClientMessage {
    /// The game this message concerns.
    #[must_use]
    pub fn game_id(&self) -> &GameId {
        match self {
            Self::JoinGame { game_id }
            | Self::GamePing { game_id }
            | Self::GameAction { game_id, .. }
            | Self::NextHand { game_id }
            | Self::QuitGame { game_id } => game_id,
        }
    }

    /// Encode to wire JSON.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::Encode` if serialization fails
    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }

    /// Decode from wire JSON.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::Decode` if the text is not a valid message
    pub fn decode(raw: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(raw).map_err(ProtocolError::Decode)
    }
}

/// Server-to-client messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Reply to [`ClientMessage::JoinGame`]: the current snapshot, or `None`
    /// when no such game exists.
    JoinReply(Option<GameSnapshot>),

    /// Pushed snapshot superseding all previously known game state.
    GameUpdate(GameSnapshot),
}

impl ServerMessage {
    /// Encode to wire JSON.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::Encode` if serialization fails
    pub fn encode(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }

    /// Decode from wire JSON.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::Decode` if the text is not a valid message
    pub fn decode(raw: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(raw).map_err(ProtocolError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameStatus;

    #[test]
    fn join_game_wire_shape() {
        let msg = ClientMessage::JoinGame { game_id: GameId::from("g1") };
        let json = msg.encode().unwrap();
        assert_eq!(json, r#"{"event":"join_game","data":{"game_id":"g1"}}"#);
    }

    #[test]
    fn game_id_accessor_covers_all_variants() {
        let id = GameId::from("g7");
        let msgs = [
            ClientMessage::JoinGame { game_id: id.clone() },
            ClientMessage::GamePing { game_id: id.clone() },
            ClientMessage::NextHand { game_id: id.clone() },
            ClientMessage::QuitGame { game_id: id.clone() },
        ];
        for msg in &msgs {
            assert_eq!(msg.game_id(), &id);
        }
    }

    #[test]
    fn join_reply_null_means_not_found() {
        let raw = r#"{"event":"join_reply","data":null}"#;
        let msg = ServerMessage::decode(raw).unwrap();
        assert_eq!(msg, ServerMessage::JoinReply(None));
    }

    #[test]
    fn game_update_carries_snapshot() {
        let raw = r#"{"event":"game_update","data":{"status":"in_progress"}}"#;
        let msg = ServerMessage::decode(raw).unwrap();
        match msg {
            ServerMessage::GameUpdate(snap) => assert_eq!(snap.status, GameStatus::InProgress),
            other => panic!("expected GameUpdate, got {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_unknown_event() {
        let raw = r#"{"event":"shuffle_up","data":{}}"#;
        assert!(ServerMessage::decode(raw).is_err());
        assert!(ClientMessage::decode(raw).is_err());
    }
}
