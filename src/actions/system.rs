//! Host system control
//!
//! Shutdown, reboot, and address lookup all shell out; the dependency on
//! the shell is explicit here rather than scattered through the handlers.

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::{info, warn};

/// Privileged host operations invoked by spoken commands
#[allow(async_fn_in_trait)]
pub trait SystemControl {
    /// Power the machine off. Irreversible.
    async fn shutdown(&self);

    /// Reboot the machine. Irreversible.
    async fn reboot(&self);

    /// The host's primary network address, if one is configured
    async fn primary_ip(&self) -> Result<Option<String>>;
}

/// System control backed by the usual Raspberry Pi shell commands
pub struct HostSystem;

impl HostSystem {
    async fn run_privileged(&self, args: &[&str]) {
        info!(?args, "invoking privileged command");
        // The OS terminates this process shortly after; errors are only
        // worth a log line.
        if let Err(e) = Command::new("sudo").args(args).status().await {
            warn!(?e, ?args, "privileged command failed");
        }
    }
}

impl SystemControl for HostSystem {
    async fn shutdown(&self) {
        self.run_privileged(&["shutdown", "now"]).await;
    }

    async fn reboot(&self) {
        self.run_privileged(&["reboot"]).await;
    }

    async fn primary_ip(&self) -> Result<Option<String>> {
        let output = Command::new("hostname")
            .arg("-I")
            .output()
            .await
            .context("failed to run hostname")?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(first_address(&stdout))
    }
}

/// First whitespace-separated address in `hostname -I` output
fn first_address(stdout: &str) -> Option<String> {
    stdout
        .split_whitespace()
        .next()
        .map(|addr| addr.to_string())
}
