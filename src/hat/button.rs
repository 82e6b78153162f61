//! Hardware button trigger
//!
//! On the Voice HAT the button is wired through the hardware helper's
//! GPIO driver, which invokes the press callback on its own execution
//! context. Off-device (and on the bench) SIGUSR1 stands in for the
//! physical press: `kill -USR1 $(pidof voicehat-daemon)`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

/// Delivers button presses to a registered callback
///
/// The callback runs on the listener's own task, concurrently with event
/// processing, so it must only touch state that is safe to share.
pub struct ButtonListener {
    registered: Arc<AtomicBool>,
}

impl ButtonListener {
    pub fn new() -> Self {
        Self {
            registered: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Register the press callback and start listening
    ///
    /// Idempotent: the first call wins, later calls are no-ops. The
    /// dispatcher re-invokes this on every session start.
    pub fn on_press<F>(&self, callback: F)
    where
        F: Fn() + Send + 'static,
    {
        if self.registered.swap(true, Ordering::SeqCst) {
            return;
        }

        tokio::spawn(async move {
            let mut press = match signal(SignalKind::user_defined1()) {
                Ok(press) => press,
                Err(e) => {
                    error!(?e, "failed to register button signal handler");
                    return;
                }
            };

            info!("button trigger registered");

            while press.recv().await.is_some() {
                callback();
            }
        });
    }

    /// Whether a callback has been registered
    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::SeqCst)
    }
}

impl Default for ButtonListener {
    fn default() -> Self {
        Self::new()
    }
}
