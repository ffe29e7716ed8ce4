//! Protocol error types.

use thiserror::Error;

/// Errors from encoding or decoding wire messages.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A message could not be serialized to JSON.
    #[error("message encoding failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Received text was not a valid message.
    #[error("message decoding failed: {0}")]
    Decode(#[source] serde_json::Error),
}
