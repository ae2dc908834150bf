//! Portfolio timer: repeating per-counter timers driven off the UI thread.
mod driver;
mod sink;
mod types;

pub use driver::{TimerDriver, MIN_INTERVAL};
pub use sink::{ChannelTickSink, TickSink};
pub use types::{TimerError, TimerEvent, TimerId};
