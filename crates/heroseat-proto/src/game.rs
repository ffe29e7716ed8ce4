//! Snapshot data model: the server's authoritative description of one game.
//!
//! A snapshot is complete and self-contained. The client replaces its held
//! snapshot wholesale on every push and never merges two, so nothing here
//! models deltas. Fields inside the engine's table message all deserialize
//! permissively: a partial message degrades the display, it never fails it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    card::CardCode,
    moves::{HistoryEntry, LegalMove},
};

/// Opaque identifier of one game session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A chip count. Signed because bankroll deltas go negative.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Chips(pub i64);

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Server-assigned lifecycle status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// The game exists but the match has not started.
    Created,
    /// Match underway.
    InProgress,
    /// The engine failed; the game cannot continue.
    InternalError,
    /// Match finished.
    Completed,
}

/// Identity of the opposing bot, for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotIdentity {
    /// Team that owns the bot.
    #[serde(default)]
    pub team: String,
    /// Bot name within the team.
    #[serde(default)]
    pub name: String,
}

/// Stage the engine reported in its latest table message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TablePhase {
    /// Opponent bot source is being fetched and compiled.
    DownloadAndCompile,
    /// Match process is starting.
    StartingGame,
    /// The engine is waiting on the player's move.
    GetAction,
    /// The hand has resolved.
    RoundOver,
}

/// Outcome of a resolved hand, from the player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandResult {
    /// Player took the pot.
    Win,
    /// Opponent took the pot.
    Loss,
    /// Pot split.
    Tie,
}

/// Pot accounting for the current hand.
///
/// Only the totals the display layer reads are modeled; the server computes
/// all of them authoritatively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pot {
    /// Player chips committed on the current street.
    pub pip: Chips,
    /// Player chips committed across the hand's betting.
    pub bets: Chips,
    /// Player total contribution, exchanges included.
    pub total: Chips,
    /// Opponent total contribution.
    pub opponent_total: Chips,
    /// The whole pot: both contributions combined.
    pub grand_total: Chips,
    /// Card exchanges bought by the player.
    pub num_exchanges: u32,
    /// Card exchanges bought by the opponent.
    pub opponent_num_exchanges: u32,
    /// Bounty rank, in variants that pay one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounty_rank: Option<String>,
}

/// The engine's latest table message inside a snapshot.
///
/// Every field deserializes permissively: whatever the engine omitted
/// defaults to empty, and the display degrades instead of erroring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableState {
    /// Stage the engine is in. `None` when the message carried no stage.
    pub status: Option<TablePhase>,
    /// Hand number as the engine counts it.
    pub round_num: Option<u32>,
    /// Player bankroll entering the hand.
    pub bankroll: Chips,
    /// Opponent bankroll entering the hand.
    pub opponent_bankroll: Chips,
    /// Player bankroll after a resolved hand.
    pub new_bankroll: Option<Chips>,
    /// Opponent bankroll after a resolved hand.
    pub new_opponent_bankroll: Option<Chips>,
    /// Pot accounting.
    pub pot: Pot,
    /// The player's hole cards.
    pub cards: Vec<CardCode>,
    /// The opponent's hole cards; hidden sentinels until shown.
    pub opponent_cards: Vec<CardCode>,
    /// Community cards.
    pub board_cards: Vec<CardCode>,
    /// Hand outcome, present once the hand resolved.
    pub result: Option<HandResult>,
    /// Free-text engine remark, shown when a game completes.
    pub message: Option<String>,
    /// Moves narrated so far this hand, earliest first.
    pub move_history: Vec<HistoryEntry>,
    /// Currently legal player moves.
    pub legal_moves: Vec<LegalMove>,
}

/// A complete description of one game as pushed by the server.
///
/// Supersedes any previously held snapshot entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Server-assigned lifecycle status.
    pub status: GameStatus,
    /// The opposing bot.
    #[serde(default)]
    pub bot: BotIdentity,
    /// Latest engine table message; absent until the match emits one.
    #[serde(default)]
    pub last_message: Option<TableState>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_status_uses_snake_case() {
        let json = serde_json::to_string(&GameStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");

        let status: GameStatus = serde_json::from_str("\"internal_error\"").unwrap();
        assert_eq!(status, GameStatus::InternalError);
    }

    #[test]
    fn table_state_defaults_every_missing_field() {
        let table: TableState = serde_json::from_str("{}").unwrap();
        assert_eq!(table.status, None);
        assert_eq!(table.bankroll, Chips(0));
        assert!(table.cards.is_empty());
        assert!(table.legal_moves.is_empty());
        assert_eq!(table.pot.grand_total, Chips(0));
    }

    #[test]
    fn snapshot_without_table_message_parses() {
        let raw = r#"{"status":"created"}"#;
        let snap: GameSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snap.status, GameStatus::Created);
        assert_eq!(snap.bot, BotIdentity::default());
        assert!(snap.last_message.is_none());
    }

    #[test]
    fn snapshot_ignores_unknown_fields() {
        // The server sends its own uuid alongside the modeled fields.
        let raw = r#"{"uuid":"abc-123","status":"completed","bot":{"team":"t","name":"n"}}"#;
        let snap: GameSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snap.status, GameStatus::Completed);
        assert_eq!(snap.bot.team, "t");
    }
}
