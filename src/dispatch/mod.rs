//! Event dispatch: the command grammar and the central event handler

mod command;
mod dispatcher;

pub use command::{classify, Command};
pub use dispatcher::{ButtonTrigger, Dispatcher, Flow, Readiness};
