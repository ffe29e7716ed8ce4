//! Background task that folds transport signals into link states.
//!
//! Owns a [`LinkMonitor`] and republishes its state on every change. The
//! consumer sees a deduplicated stream of [`LinkState`] values: signals
//! that the monitor absorbs, such as per-attempt errors during a retry
//! cycle, produce no update at all.

use heroseat_client::{LinkMonitor, LinkSignal, LinkState};
use tokio::sync::mpsc;

/// Handle to a running link watch task.
pub struct LinkWatch {
    /// Abort handle to stop the watch task.
    abort_handle: tokio::task::AbortHandle,
}

impl LinkWatch {
    /// Spawn a link watch over a stream of transport signals.
    ///
    /// `transport_open` seeds the monitor with whether the transport was
    /// already connected when the watch started. The current state is
    /// published once at startup, then again on every change.
    #[must_use]
    pub fn spawn(
        transport_open: bool,
        signals: mpsc::Receiver<LinkSignal>,
        updates: mpsc::Sender<LinkState>,
    ) -> Self {
        let handle = tokio::spawn(run_link_watch(transport_open, signals, updates));
        Self { abort_handle: handle.abort_handle() }
    }

    /// Stop the watch.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Fold signals into states until either side hangs up.
async fn run_link_watch(
    transport_open: bool,
    mut signals: mpsc::Receiver<LinkSignal>,
    updates: mpsc::Sender<LinkState>,
) {
    let mut monitor = LinkMonitor::new(transport_open);

    let mut published = monitor.state();
    if updates.send(published).await.is_err() {
        return;
    }

    while let Some(signal) = signals.recv().await {
        let state = monitor.observe(signal);
        if state == published {
            continue;
        }

        published = state;
        if updates.send(state).await.is_err() {
            break;
        }
    }
}
