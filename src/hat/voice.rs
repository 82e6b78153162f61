//! Spoken announcements
//!
//! Wraps the text-to-speech helper behind a trait so action handlers can
//! be exercised without audio hardware.

use tokio::process::Command;
use tracing::{debug, warn};

/// Speaks short announcements to the user
#[allow(async_fn_in_trait)]
pub trait Voice {
    /// Speak with the default voice settings
    async fn say(&self, text: &str);

    /// Speak with explicit pitch and volume
    async fn say_with(&self, text: &str, pitch: u32, volume: u32);
}

/// Voice backed by an external TTS command (espeak by default)
///
/// Synthesis failures are logged and swallowed; a silent assistant is
/// better than a dead one.
pub struct CommandVoice {
    command: String,
}

impl CommandVoice {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    async fn run(&self, args: &[String]) {
        debug!(command = %self.command, ?args, "speaking");
        match Command::new(&self.command).args(args).status().await {
            Ok(status) if status.success() => {}
            Ok(status) => warn!(?status, "TTS command failed"),
            Err(e) => warn!(?e, command = %self.command, "failed to run TTS command"),
        }
    }
}

impl Voice for CommandVoice {
    async fn say(&self, text: &str) {
        self.run(&[text.to_string()]).await;
    }

    async fn say_with(&self, text: &str, pitch: u32, volume: u32) {
        let args = [
            "-p".to_string(),
            pitch.to_string(),
            "-a".to_string(),
            volume.to_string(),
            text.to_string(),
        ];
        self.run(&args).await;
    }
}
