//! Signal handling for orderly shutdown
//!
//! Shutdown and reboot commands terminate the process externally; this
//! handler only covers operator-driven SIGTERM/SIGINT.

use tokio::signal::unix::{signal, SignalKind};
use tracing::debug;

/// Waits for a termination signal
pub struct ShutdownSignal;

impl ShutdownSignal {
    pub fn new() -> Self {
        Self
    }

    /// Resolve when SIGTERM or SIGINT arrives
    pub async fn wait(&self) {
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to register SIGTERM handler");
        let mut sigint =
            signal(SignalKind::interrupt()).expect("failed to register SIGINT handler");

        tokio::select! {
            _ = sigterm.recv() => {
                debug!("received SIGTERM");
            }
            _ = sigint.recv() => {
                debug!("received SIGINT");
            }
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
