//! Central event handler
//!
//! Consumes assistant events strictly in delivery order, maintains the
//! conversation-readiness flag, and turns recognized transcripts into
//! actions. Action handlers run inline, so a slow handler holds up the
//! next event by design.

use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::actions::{Actions, LightSwitch, SystemControl};
use crate::events::AssistantEvent;
use crate::hat::{ButtonListener, Status, StatusUi, Voice};
use crate::session::ConversationControl;

use super::command::classify;

/// Whether the main loop should keep consuming events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Flow {
    Continue,
    /// The engine reported an unrecoverable error; exit with status 1
    Fatal,
}

/// Whether a new conversation turn may currently be started
///
/// Written by the dispatcher on the event task, read by the button
/// trigger on its own context. True only between a ready transition and
/// the next turn start.
#[derive(Clone, Default)]
pub struct Readiness(Arc<AtomicBool>);

impl Readiness {
    pub fn set(&self, ready: bool) {
        self.0.store(ready, Ordering::Release);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Button-press handler: starts a conversation only when one may start
///
/// The readiness check debounces presses while a conversation is active
/// or the session is still initializing.
pub struct ButtonTrigger {
    readiness: Readiness,
    session: Arc<dyn ConversationControl>,
}

impl ButtonTrigger {
    pub fn new(readiness: Readiness, session: Arc<dyn ConversationControl>) -> Self {
        Self { readiness, session }
    }

    pub fn on_press(&self) {
        if self.readiness.get() {
            info!("button pressed, starting conversation");
            self.session.start_conversation();
        } else {
            debug!("button pressed while busy, ignoring");
        }
    }
}

/// Dispatches assistant events to status transitions and actions
pub struct Dispatcher<S, L, V> {
    status_ui: Arc<dyn StatusUi>,
    session: Arc<dyn ConversationControl>,
    actions: Actions<S, L, V>,
    button: ButtonListener,
    readiness: Readiness,
}

impl<S, L, V> Dispatcher<S, L, V>
where
    S: SystemControl,
    L: LightSwitch,
    V: Voice,
{
    pub fn new(
        status_ui: Arc<dyn StatusUi>,
        session: Arc<dyn ConversationControl>,
        actions: Actions<S, L, V>,
        button: ButtonListener,
    ) -> Self {
        Self {
            status_ui,
            session,
            actions,
            button,
            readiness: Readiness::default(),
        }
    }

    /// The shared readiness flag
    pub fn readiness(&self) -> Readiness {
        self.readiness.clone()
    }

    /// Consume events until the session ends or a fatal error arrives
    pub async fn run(&mut self, mut event_rx: mpsc::Receiver<AssistantEvent>) -> Flow {
        info!("dispatcher started");

        while let Some(event) = event_rx.recv().await {
            if self.handle(&event).await == Flow::Fatal {
                return Flow::Fatal;
            }
        }

        info!("event stream ended");
        Flow::Continue
    }

    /// Handle one event; called once per event in delivery order
    pub async fn handle(&mut self, event: &AssistantEvent) -> Flow {
        debug!(%event, "assistant event");

        match event {
            AssistantEvent::SessionStarted => {
                self.status_ui.status(Status::Ready);
                self.readiness.set(true);
                self.register_button();
                if std::io::stdout().is_terminal() {
                    println!(
                        "Say \"OK, Google\" or press the button, then speak. \
                         Press Ctrl+C to quit..."
                    );
                }
            }

            AssistantEvent::TurnStarted => {
                self.readiness.set(false);
                self.status_ui.status(Status::Listening);
            }

            AssistantEvent::SpeechRecognized { text } => {
                info!(%text, "you said");
                if let Some(command) = classify(text) {
                    info!(?command, "command recognized");
                    self.session.stop_conversation();
                    self.actions.run(command).await;
                }
            }

            AssistantEvent::EndOfUtterance => {
                self.status_ui.status(Status::Thinking);
            }

            AssistantEvent::TurnFinished
            | AssistantEvent::TurnTimeout
            | AssistantEvent::NoResponse => {
                self.status_ui.status(Status::Ready);
                self.readiness.set(true);
            }

            AssistantEvent::AssistantError { is_fatal } => {
                if *is_fatal {
                    error!("assistant reported a fatal error");
                    return Flow::Fatal;
                }
                debug!("assistant reported a recoverable error");
            }

            AssistantEvent::Other => {}
        }

        Flow::Continue
    }

    /// Register the button-press callback; idempotent across session starts
    fn register_button(&self) {
        let trigger = ButtonTrigger::new(self.readiness.clone(), Arc::clone(&self.session));
        self.button.on_press(move || trigger.on_press());
    }
}
