//! Spoken command grammar
//!
//! Classification is a pure function of the transcript: an ordered rule
//! list evaluated top-down, stopping at the first match. Exact phrases
//! come first, substring rules after, so "power off now" matches nothing
//! while "turn the light on please" still switches the light.

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

/// The closed set of commands this assistant reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PowerOff,
    Reboot,
    SayIp,
    LightOn,
    LightOff,
    /// Dim level in 0..=100
    LightLevel(u8),
}

fn percent_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+%").expect("percent pattern is valid"))
}

/// Classify a transcript into at most one command
///
/// Matching is case-insensitive; at most one command fires per utterance.
pub fn classify(transcript: &str) -> Option<Command> {
    let text = transcript.to_lowercase();

    if text == "power off" {
        return Some(Command::PowerOff);
    }
    if text == "reboot" {
        return Some(Command::Reboot);
    }
    if text == "ip address" {
        return Some(Command::SayIp);
    }

    if text.contains("light") {
        if let Some(m) = percent_pattern().find(&text) {
            return parse_level(m.as_str());
        }
        if text.contains("on") {
            return Some(Command::LightOn);
        }
        if text.contains("off") {
            return Some(Command::LightOff);
        }
    }

    None
}

/// Parse the digits of a `<digits>%` match, clamped to 0..=100
///
/// The pattern guarantees at least one digit, but absurdly long runs can
/// still overflow the parse; those are dropped rather than acted on.
fn parse_level(matched: &str) -> Option<Command> {
    let digits = matched.trim_end_matches('%');
    match digits.parse::<u64>() {
        Ok(level) => Some(Command::LightLevel(level.min(100) as u8)),
        Err(_) => {
            warn!(%matched, "unparseable light level, ignoring");
            None
        }
    }
}
