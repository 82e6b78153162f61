//! Startup hardware guard
//!
//! The assistant engine only ships for Pi 2/3-class boards; the Pi Zero
//! (`armv6l`) is refused before any session is started.

use anyhow::{Context, Result};

/// Machine identifier refused at startup
const UNSUPPORTED_MACHINE: &str = "armv6l";

/// The hardware machine identifier, as reported by `uname -m`
pub fn machine() -> Result<String> {
    let output = std::process::Command::new("uname")
        .arg("-m")
        .output()
        .context("failed to query machine type")?;

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Whether the daemon can run on the given machine
pub fn is_supported(machine: &str) -> bool {
    machine != UNSUPPORTED_MACHINE
}
