//! Status indicator seam
//!
//! The physical indicator (LED ring on the Voice HAT) is driven by the
//! hardware helper; the daemon only signals which state to render.

use std::path::Path;

use tracing::info;

/// Human-visible assistant states rendered by the indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Waiting for the hotword or a button press
    Ready,
    /// A conversation turn is active and the microphone is open
    Listening,
    /// The engine is processing the utterance
    Thinking,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Ready => write!(f, "ready"),
            Status::Listening => write!(f, "listening"),
            Status::Thinking => write!(f, "thinking"),
        }
    }
}

/// Renders assistant state for the user
pub trait StatusUi: Send + Sync {
    /// Switch the indicator to the given state
    fn status(&self, status: Status);

    /// Set the audio cue played when the hotword triggers
    fn set_trigger_sound_wave(&self, path: &Path);
}

/// Status UI that renders transitions as log lines
///
/// Stands in for the LED driver when running off-device.
pub struct LogStatusUi;

impl StatusUi for LogStatusUi {
    fn status(&self, status: Status) {
        info!(%status, "indicator");
    }

    fn set_trigger_sound_wave(&self, path: &Path) {
        info!(?path, "trigger sound configured");
    }
}
