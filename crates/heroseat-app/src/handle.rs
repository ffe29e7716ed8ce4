//! Channel-based transport pair.
//!
//! The application talks to the server through plain channels so a concrete
//! socket bridge and a test driver are interchangeable. No network code
//! lives here; the bridge owns the wire and feeds [`TransportEnd`], while
//! the runtimes consume the [`ServerHandle`] side.
//!
//! Connectivity signals and server messages travel on separate channels:
//! the link watch consumes one, the session runtime the other, and neither
//! sees the other's traffic.

use heroseat_client::LinkSignal;
use heroseat_proto::{ClientMessage, ServerMessage};
use thiserror::Error;
use tokio::sync::mpsc;

/// Capacity of each transport channel.
const CHANNEL_CAPACITY: usize = 32;

/// The other side of the transport pair has gone away.
#[derive(Debug, Error)]
#[error("transport channel closed")]
pub struct TransportClosed;

/// Application side of the transport.
///
/// Created by [`transport_pair`]. The controller that owns it splits the
/// fields between the two runtimes: `signals` feeds the link watch,
/// `to_server` and `from_server` feed the session runtime.
pub struct ServerHandle {
    /// Messages bound for the server.
    pub to_server: mpsc::Sender<ClientMessage>,
    /// Replies and pushes from the server.
    pub from_server: mpsc::Receiver<ServerMessage>,
    /// Raw connectivity signals from the transport.
    pub signals: mpsc::Receiver<LinkSignal>,
}

/// Transport side of the pair, driven by a socket bridge or a test.
pub struct TransportEnd {
    /// Messages the application wants sent on the wire.
    pub outgoing: mpsc::Receiver<ClientMessage>,
    pushes: mpsc::Sender<ServerMessage>,
    signals: mpsc::Sender<LinkSignal>,
}

impl TransportEnd {
    /// Deliver a decoded server message to the application.
    ///
    /// # Errors
    ///
    /// - `TransportClosed` if the application side was dropped
    pub async fn push(&self, msg: ServerMessage) -> Result<(), TransportClosed> {
        self.pushes.send(msg).await.map_err(|_| TransportClosed)
    }

    /// Decode one wire text and deliver it.
    ///
    /// Undecodable text is logged and dropped; the server owns validation
    /// and a malformed line must not wedge the stream.
    ///
    /// # Errors
    ///
    /// - `TransportClosed` if the application side was dropped
    pub async fn push_text(&self, raw: &str) -> Result<(), TransportClosed> {
        match ServerMessage::decode(raw) {
            Ok(msg) => self.push(msg).await,
            Err(err) => {
                tracing::warn!("Dropping undecodable server message: {:?}", err);
                Ok(())
            },
        }
    }

    /// Report a connectivity signal to the application.
    ///
    /// # Errors
    ///
    /// - `TransportClosed` if the application side was dropped
    pub async fn signal(&self, signal: LinkSignal) -> Result<(), TransportClosed> {
        self.signals.send(signal).await.map_err(|_| TransportClosed)
    }
}

/// Create a connected transport pair.
#[must_use]
pub fn transport_pair() -> (ServerHandle, TransportEnd) {
    let (to_server, outgoing) = mpsc::channel(CHANNEL_CAPACITY);
    let (pushes, from_server) = mpsc::channel(CHANNEL_CAPACITY);
    let (signals_tx, signals_rx) = mpsc::channel(CHANNEL_CAPACITY);

    let handle = ServerHandle { to_server, from_server, signals: signals_rx };
    let end = TransportEnd { outgoing, pushes, signals: signals_tx };
    (handle, end)
}
