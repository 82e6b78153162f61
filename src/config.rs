//! Configuration loading and management

use std::path::PathBuf;

use anyhow::Result;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the home-automation endpoint
    pub automation_url: String,

    /// Switch index of the controlled light in the automation server
    pub switch_idx: u32,

    /// Sound played by the status UI when the hotword triggers
    pub trigger_sound: PathBuf,

    /// Path to the assistant credentials file
    pub credentials_path: PathBuf,

    /// Text-to-speech command used for spoken announcements
    pub tts_command: String,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self> {
        let home = std::env::var("HOME")?;

        let automation_url = std::env::var("VOICEHAT_AUTOMATION_URL")
            .unwrap_or_else(|_| "http://localhost:8080/json.htm".to_string());

        let switch_idx = match std::env::var("VOICEHAT_SWITCH_IDX") {
            Ok(raw) => raw.parse()?,
            Err(_) => 1,
        };

        let trigger_sound = std::env::var("VOICEHAT_TRIGGER_SOUND")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("sounds/trigger.wav"));

        let credentials_path = std::env::var("VOICEHAT_CREDENTIALS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                PathBuf::from(&home)
                    .join(".config")
                    .join("voicehat")
                    .join("assistant.json")
            });

        let tts_command =
            std::env::var("VOICEHAT_TTS_CMD").unwrap_or_else(|_| "espeak".to_string());

        Ok(Self {
            automation_url,
            switch_idx,
            trigger_sound,
            credentials_path,
            tts_command,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_load_defaults() {
        let config = Config::load().unwrap();
        assert!(config.automation_url.contains("json.htm"));
        assert_eq!(config.switch_idx, 1);
        assert_eq!(config.tts_command, "espeak");
    }
}
