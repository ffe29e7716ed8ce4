//! Card codes as they appear on the wire.
//!
//! The server describes cards as compact two-character strings, rank then
//! suit (`"As"`, `"Td"`). A face-down opponent card is the sentinel `"??"`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel code for a card the player is not allowed to see.
pub const HIDDEN_CARD: &str = "??";

/// A single card as pushed by the server.
///
/// Kept as the raw wire code: this client displays cards, it never ranks
/// them, so parsing into rank/suit enums would add nothing. [`CardCode::rank`]
/// and [`CardCode::suit`] expose the characters for display layers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardCode(pub String);

impl CardCode {
    /// The hidden-card sentinel.
    #[must_use]
    pub fn hidden() -> Self {
        Self(HIDDEN_CARD.to_string())
    }

    /// True if this is the hidden-card sentinel.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.0 == HIDDEN_CARD
    }

    /// Rank character (`'2'`..`'9'`, `'T'`, `'J'`, `'Q'`, `'K'`, `'A'`), if
    /// the card is visible.
    #[must_use]
    pub fn rank(&self) -> Option<char> {
        if self.is_hidden() { None } else { self.0.chars().next() }
    }

    /// Suit character (`'c'`, `'d'`, `'h'`, `'s'`), if the card is visible.
    #[must_use]
    pub fn suit(&self) -> Option<char> {
        if self.is_hidden() { None } else { self.0.chars().nth(1) }
    }
}

impl From<&str> for CardCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl fmt::Display for CardCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_card_splits_into_rank_and_suit() {
        let card = CardCode::from("As");
        assert!(!card.is_hidden());
        assert_eq!(card.rank(), Some('A'));
        assert_eq!(card.suit(), Some('s'));
    }

    #[test]
    fn hidden_card_has_no_rank_or_suit() {
        let card = CardCode::hidden();
        assert!(card.is_hidden());
        assert_eq!(card.rank(), None);
        assert_eq!(card.suit(), None);
    }

    #[test]
    fn serializes_as_bare_string() {
        let json = serde_json::to_string(&CardCode::from("Td")).unwrap();
        assert_eq!(json, "\"Td\"");

        let card: CardCode = serde_json::from_str("\"??\"").unwrap();
        assert!(card.is_hidden());
    }
}
