//! Assistant event model
//!
//! Mirrors the event stream surfaced by the speech-assistant engine. The
//! serde representation doubles as the wire format of the JSON-lines
//! session adapter.

use serde::{Deserialize, Serialize};

/// Events yielded by the assistant engine, in delivery order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssistantEvent {
    /// Engine finished starting; conversations may begin
    SessionStarted,

    /// A conversation turn began (hotword or button)
    TurnStarted,

    /// The engine finished recognizing an utterance
    SpeechRecognized {
        /// Raw transcript as produced by the recognizer
        text: String,
    },

    /// The user stopped speaking; the engine is formulating a response
    EndOfUtterance,

    /// The turn completed normally
    TurnFinished,

    /// The turn ended because the engine timed out waiting for speech
    TurnTimeout,

    /// The engine decided not to respond
    NoResponse,

    /// The engine reported an error
    AssistantError {
        /// Unrecoverable errors require process exit
        #[serde(default)]
        is_fatal: bool,
    },

    /// Any event kind this daemon does not react to
    #[serde(other)]
    Other,
}

impl std::fmt::Display for AssistantEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssistantEvent::SessionStarted => write!(f, "SESSION_STARTED"),
            AssistantEvent::TurnStarted => write!(f, "TURN_STARTED"),
            AssistantEvent::SpeechRecognized { text } => {
                write!(f, "SPEECH_RECOGNIZED ({text:?})")
            }
            AssistantEvent::EndOfUtterance => write!(f, "END_OF_UTTERANCE"),
            AssistantEvent::TurnFinished => write!(f, "TURN_FINISHED"),
            AssistantEvent::TurnTimeout => write!(f, "TURN_TIMEOUT"),
            AssistantEvent::NoResponse => write!(f, "NO_RESPONSE"),
            AssistantEvent::AssistantError { is_fatal } => {
                write!(f, "ASSISTANT_ERROR (fatal: {is_fatal})")
            }
            AssistantEvent::Other => write!(f, "OTHER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = AssistantEvent::SpeechRecognized {
            text: "ip address".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("speech_recognized"));
        assert!(json.contains("ip address"));
    }

    #[test]
    fn test_event_deserialization() {
        let json = r#"{"type":"turn_started"}"#;
        let event: AssistantEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(event, AssistantEvent::TurnStarted));
    }

    #[test]
    fn test_error_fatal_flag_defaults_to_false() {
        let json = r#"{"type":"assistant_error"}"#;
        let event: AssistantEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(
            event,
            AssistantEvent::AssistantError { is_fatal: false }
        ));
    }

    #[test]
    fn test_unknown_event_type_maps_to_other() {
        let json = r#"{"type":"on_media_track_play"}"#;
        let event: AssistantEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(event, AssistantEvent::Other));
    }
}
