//! Time sources.
//!
//! Every time-dependent operation (start, pause, resume, seek, tick) reads the
//! same injected clock, so a whole timeline can be driven deterministically in
//! tests or from a host's frame counter.

use std::cell::Cell;
use std::time::Instant;

/// A monotonic millisecond clock.
pub trait Clock {
    /// Milliseconds elapsed on this clock's timeline.
    fn now_ms(&self) -> f64;
}

/// Wall-clock time measured from process startup.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// A clock that only moves when told to. Intended for tests and hosts that
/// own their own frame timing.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the clock to an absolute millisecond value.
    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    /// Move the clock forward by `ms`.
    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
