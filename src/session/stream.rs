//! Session traits and the JSON-lines adapter
//!
//! `JsonLinesSession` reads one JSON-encoded event per line, which is how
//! the engine shim on the device hands events to this daemon and how
//! integration tests drive it.

use std::io::BufRead;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::events::AssistantEvent;

/// Conversation controls exposed by the assistant session
///
/// Shared between the dispatcher (stop) and the button trigger (start),
/// so implementations must be callable from either context.
pub trait ConversationControl: Send + Sync {
    /// Begin a new conversation turn, as if the hotword had fired
    fn start_conversation(&self);

    /// Cut the current turn short, discarding the engine's response
    fn stop_conversation(&self);
}

/// Blocking source of assistant events
///
/// `next_event` blocks until the engine yields; `None` means the engine
/// ended the session. Takes `&self` because the session handle is shared
/// with the conversation-control callers.
pub trait EventSource: Send + Sync {
    fn next_event(&self) -> Result<Option<AssistantEvent>>;
}

/// Session adapter reading line-delimited JSON events
pub struct JsonLinesSession<R> {
    reader: Mutex<R>,
}

impl<R: BufRead> JsonLinesSession<R> {
    /// Construct a session from a credentials file and an event stream
    ///
    /// The credential material is opaque to the daemon; only its presence
    /// is checked before the engine is handed the path.
    pub fn new(credentials: &Path, reader: R) -> Result<Self> {
        if !credentials.exists() {
            anyhow::bail!("assistant credentials not found at {credentials:?}");
        }
        info!(?credentials, "assistant session created");

        Ok(Self {
            reader: Mutex::new(reader),
        })
    }
}

impl<R: BufRead + Send> EventSource for JsonLinesSession<R> {
    fn next_event(&self) -> Result<Option<AssistantEvent>> {
        let mut reader = self.reader.lock().expect("session reader poisoned");

        loop {
            let mut line = String::new();
            let n = reader
                .read_line(&mut line)
                .context("failed to read event stream")?;
            if n == 0 {
                return Ok(None);
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str(line) {
                Ok(event) => return Ok(Some(event)),
                Err(e) => {
                    warn!(?e, line, "discarding malformed event");
                }
            }
        }
    }
}

impl<R: Send> ConversationControl for JsonLinesSession<R> {
    fn start_conversation(&self) {
        debug!("start_conversation requested");
    }

    fn stop_conversation(&self) {
        debug!("stop_conversation requested");
    }
}
