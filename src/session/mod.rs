//! Assistant session seam
//!
//! The speech engine is an external collaborator; the daemon consumes it
//! through two narrow traits and a worker thread that bridges the
//! engine's blocking event loop into the async world.

mod stream;
mod worker;

pub use stream::{ConversationControl, EventSource, JsonLinesSession};
pub use worker::{SessionError, SessionWorker};
