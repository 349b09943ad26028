//! Clock implementations

use std::cell::Cell;
use std::time::{Duration, Instant};

use super::Clock;

/// Wall clock measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn sleep_ms(&self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Clock that only moves when told to; sleeping advances it instantly
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn sleep_ms(&self, ms: u64) {
        self.advance(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        clock.sleep_ms(2);
        let b = clock.now_ms();
        assert!(b >= a + 1);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now_ms(), 100);
        clock.sleep_ms(16);
        clock.advance(4);
        assert_eq!(clock.now_ms(), 120);
    }
}
