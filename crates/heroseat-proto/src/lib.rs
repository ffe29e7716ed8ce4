//! Wire protocol for the heroseat game client.
//!
//! Defines the JSON messages exchanged with the remote game server and the
//! snapshot data model they carry. Everything here is plain data with
//! encode/decode entry points: no I/O, no state. The state machines in
//! `heroseat-client` consume these types.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod card;
mod error;
mod game;
mod message;
mod moves;

pub use card::{CardCode, HIDDEN_CARD};
pub use error::ProtocolError;
pub use game::{
    BotIdentity, Chips, GameId, GameSnapshot, GameStatus, HandResult, Pot, TablePhase, TableState,
};
pub use message::{ClientMessage, ServerMessage};
pub use moves::{ActionKind, Actor, HistoryEntry, LegalMove, PlayerAction};
