//! Voice HAT surface: status UI, spoken announcements, and the
//! hardware button trigger
//!
//! The LED driver and audio pipeline live in the hardware helper stack;
//! this daemon only talks to them through the narrow traits here.

mod button;
mod indicator;
mod voice;

pub use button::ButtonListener;
pub use indicator::{LogStatusUi, Status, StatusUi};
pub use voice::{CommandVoice, Voice};
