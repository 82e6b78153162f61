//! voicehat-daemon: voice-assistant front-end for the Raspberry Pi
//!
//! The daemon consumes events from the speech-assistant engine and
//! provides:
//! - A command grammar over recognized transcripts ("power off",
//!   "reboot", "ip address", "light on/off/<percent>%")
//! - Local system actions and a home-automation call for matched commands
//! - A hardware-button trigger for starting conversations
//!
//! Speech recognition, hotword detection, and audio I/O live in the
//! external engine; this process only reacts to what it reports.

mod actions;
mod config;
mod dispatch;
mod events;
mod hat;
mod lifecycle;
mod platform;
mod session;

use std::io::BufReader;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::actions::{Actions, DomoticzClient, HostSystem};
use crate::config::Config;
use crate::dispatch::{Dispatcher, Flow};
use crate::hat::{ButtonListener, CommandVoice, LogStatusUi, StatusUi};
use crate::lifecycle::ShutdownSignal;
use crate::session::{ConversationControl, JsonLinesSession, SessionWorker};

#[tokio::main]
async fn main() -> Result<()> {
    // Hardware guard comes first; nothing else may start on a Pi Zero
    let machine = platform::machine()?;
    if !platform::is_supported(&machine) {
        println!("Cannot run the assistant on Pi Zero!");
        std::process::exit(-1);
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        machine = %machine,
        "voicehat-daemon starting"
    );

    // Load configuration
    let config = Config::load()?;
    info!(
        automation_url = %config.automation_url,
        switch_idx = config.switch_idx,
        "configuration loaded"
    );

    // Voice HAT surface
    let status_ui: Arc<dyn StatusUi> = Arc::new(LogStatusUi);
    status_ui.set_trigger_sound_wave(&config.trigger_sound);

    // Assistant session, fed line-delimited events on stdin by the engine shim
    let session = Arc::new(JsonLinesSession::new(
        &config.credentials_path,
        BufReader::new(std::io::stdin()),
    )?);

    // Action handlers
    let actions = Actions::new(
        HostSystem,
        DomoticzClient::new(config.automation_url.clone(), config.switch_idx),
        CommandVoice::new(config.tts_command.clone()),
    );

    let mut dispatcher = Dispatcher::new(
        Arc::clone(&status_ui),
        Arc::clone(&session) as Arc<dyn ConversationControl>,
        actions,
        ButtonListener::new(),
    );

    // Session worker drains the blocking event loop on its own thread
    let (event_tx, event_rx) = mpsc::channel(32);
    let worker = SessionWorker::new(event_tx);
    worker.start(Arc::clone(&session))?;
    info!("session worker started");

    // Create shutdown signal handler
    let shutdown = ShutdownSignal::new();

    info!("daemon initialized, entering main loop");

    tokio::select! {
        flow = dispatcher.run(event_rx) => {
            if flow == Flow::Fatal {
                std::process::exit(1);
            }
            info!("assistant session ended");
        }

        _ = shutdown.wait() => {
            info!("shutdown signal received");
        }
    }

    info!("voicehat-daemon stopped");

    Ok(())
}
