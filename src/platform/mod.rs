//! Platform abstraction layer
//!
//! The frame driver only sees these traits:
//! - `Clock`: monotonic milliseconds since start, plus frame pacing sleep
//! - `InputSource`: the key state for the coming frame

pub mod clock;
pub mod input;
pub mod terminal;

pub use clock::{ManualClock, SystemClock};
pub use input::ScriptedInput;
pub use terminal::TerminalInput;

use crate::error::Result;
use crate::sim::TickInput;

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since the clock started
    fn now_ms(&self) -> u64;

    /// Block for roughly `ms` milliseconds
    fn sleep_ms(&self, ms: u64);
}

/// Polled once per frame for the current key state
pub trait InputSource {
    fn poll(&mut self) -> Result<TickInput>;
}
