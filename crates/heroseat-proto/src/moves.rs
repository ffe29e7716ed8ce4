//! Player moves: legal-move entries, submitted actions, and history
//! narration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{card::CardCode, game::Chips};

/// Kind of a move, in the server's wire spelling (`"RAISE"`, `"FOLD"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    /// Raise an existing bet. Carries wager bounds in a legal-move entry.
    Raise,
    /// Open a bet. Carries wager bounds in a legal-move entry.
    Bet,
    /// Match the outstanding bet.
    Call,
    /// Decline to bet when nothing is outstanding.
    Check,
    /// Surrender the hand.
    Fold,
    /// Post a blind. History only.
    Post,
    /// Exchange hole cards for new ones, in variants that allow it.
    Exchange,
    /// Reveal cards at showdown. History only.
    Show,
    /// Cards dealt to a street, attributed to the table. History only.
    Deal,
    /// Hand won. History only.
    Win,
    /// Hand tied. History only.
    Tie,
}

impl ActionKind {
    /// Wire spelling of this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Raise => "RAISE",
            Self::Bet => "BET",
            Self::Call => "CALL",
            Self::Check => "CHECK",
            Self::Fold => "FOLD",
            Self::Post => "POST",
            Self::Exchange => "EXCHANGE",
            Self::Show => "SHOW",
            Self::Deal => "DEAL",
            Self::Win => "WIN",
            Self::Tie => "TIE",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in a snapshot's legal-move list.
///
/// At most one entry in a list carries `min`/`max` (the wager-bounded bet or
/// raise); every other entry leaves both absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalMove {
    /// Move kind.
    pub kind: ActionKind,

    /// Additional cost of making this move.
    #[serde(default)]
    pub base_cost: Chips,

    /// Smallest allowed wager, when this is the bounded move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Chips>,

    /// Largest allowed wager, when this is the bounded move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Chips>,
}

impl LegalMove {
    /// A move without wager bounds and zero base cost.
    #[must_use]
    pub fn plain(kind: ActionKind) -> Self {
        Self { kind, base_cost: Chips(0), min: None, max: None }
    }

    /// A wager-bounded move with zero base cost.
    #[must_use]
    pub fn bounded(kind: ActionKind, min: Chips, max: Chips) -> Self {
        Self { kind, base_cost: Chips(0), min: Some(min), max: Some(max) }
    }
}

/// A player action submitted to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAction {
    /// Chosen move kind.
    pub kind: ActionKind,

    /// Wager amount. Meaningful only for the bounded kind; the server
    /// ignores it otherwise. Always carried so the payload shape is stable.
    pub amount: Option<Chips>,
}

/// Who a history entry is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    /// The player at this client.
    Hero,
    /// The opposing bot.
    Bot,
    /// The table itself (deals).
    Table,
}

/// One narrated move in a snapshot's history list, earliest first.
///
/// The optional fields are populated by kind: `amount` for posts, bets, and
/// raises; `old`/`new` for a hero exchange; `cards` for a showdown; `street`
/// for a deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Move kind.
    pub kind: ActionKind,

    /// Attribution.
    pub player: Actor,

    /// Chips amount, for posts, bets, and raises.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Chips>,

    /// Cards given up in a hero exchange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<Vec<CardCode>>,

    /// Cards drawn in a hero exchange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new: Option<Vec<CardCode>>,

    /// Cards revealed at showdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<CardCode>>,

    /// Street name for a deal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
}

impl HistoryEntry {
    /// An entry with only a kind and attribution.
    #[must_use]
    pub fn bare(kind: ActionKind, player: Actor) -> Self {
        Self { kind, player, amount: None, old: None, new: None, cards: None, street: None }
    }
}
