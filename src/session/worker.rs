//! Session worker thread
//!
//! The engine's event loop blocks the thread it runs on, so it gets a
//! dedicated OS thread. Events are forwarded one at a time over a channel,
//! preserving delivery order; the dispatcher on the other end processes
//! them strictly sequentially.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::events::AssistantEvent;

use super::stream::EventSource;

/// Errors that can occur starting the session worker
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session worker is already running")]
    AlreadyRunning,

    #[error("failed to spawn session thread: {0}")]
    ThreadSpawn(String),
}

/// Drains the blocking assistant event loop on a dedicated thread
pub struct SessionWorker {
    event_tx: mpsc::Sender<AssistantEvent>,
    running: Arc<AtomicBool>,
}

impl SessionWorker {
    /// Create a new session worker
    pub fn new(event_tx: mpsc::Sender<AssistantEvent>) -> Self {
        Self {
            event_tx,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start draining the given event source
    ///
    /// Runs until the engine ends the session or the receiving side of
    /// the channel is dropped.
    pub fn start<S>(&self, source: Arc<S>) -> Result<(), SessionError>
    where
        S: EventSource + 'static,
    {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(SessionError::AlreadyRunning);
        }

        let event_tx = self.event_tx.clone();
        let running = Arc::clone(&self.running);

        thread::Builder::new()
            .name("assistant-session".to_string())
            .spawn(move || {
                info!("session thread started");

                if let Err(e) = drain_events(source, event_tx) {
                    error!(?e, "session event loop error");
                }

                running.store(false, Ordering::SeqCst);
                info!("session thread stopped");
            })
            .map_err(|e| SessionError::ThreadSpawn(e.to_string()))?;

        Ok(())
    }

    /// Check if the worker is currently running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Forward events from the engine to the dispatcher channel
fn drain_events<S: EventSource>(
    source: Arc<S>,
    event_tx: mpsc::Sender<AssistantEvent>,
) -> anyhow::Result<()> {
    while let Some(event) = source.next_event()? {
        if event_tx.blocking_send(event).is_err() {
            warn!("dispatcher channel closed, ending session loop");
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::session::JsonLinesSession;

    #[test]
    fn test_worker_creation() {
        let (tx, _rx) = mpsc::channel(32);
        let worker = SessionWorker::new(tx);
        assert!(!worker.is_running());
    }

    #[tokio::test]
    async fn test_events_arrive_in_order() {
        let creds = tempfile::NamedTempFile::new().unwrap();
        let input = concat!(
            "{\"type\":\"session_started\"}\n",
            "{\"type\":\"turn_started\"}\n",
            "{\"type\":\"turn_finished\"}\n",
        );
        let session = Arc::new(
            JsonLinesSession::new(creds.path(), Cursor::new(input.as_bytes().to_vec())).unwrap(),
        );

        let (tx, mut rx) = mpsc::channel(32);
        let worker = SessionWorker::new(tx);
        worker.start(session).unwrap();

        assert!(matches!(
            rx.recv().await,
            Some(AssistantEvent::SessionStarted)
        ));
        assert!(matches!(rx.recv().await, Some(AssistantEvent::TurnStarted)));
        assert!(matches!(
            rx.recv().await,
            Some(AssistantEvent::TurnFinished)
        ));
        assert!(rx.recv().await.is_none());
    }

    /// Source that never yields, keeping the worker thread alive
    struct PendingSource;

    impl EventSource for PendingSource {
        fn next_event(&self) -> anyhow::Result<Option<AssistantEvent>> {
            std::thread::sleep(std::time::Duration::from_secs(60));
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_double_start_rejected() {
        let (tx, _rx) = mpsc::channel(32);
        let worker = SessionWorker::new(tx);
        worker.start(Arc::new(PendingSource)).unwrap();

        assert!(matches!(
            worker.start(Arc::new(PendingSource)),
            Err(SessionError::AlreadyRunning)
        ));
    }
}
