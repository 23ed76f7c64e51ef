//! Wall-clock delay adapter.
//!
//! Implements [`DelayNs`] with `std::thread::sleep`, which is all the
//! single-threaded poll loop needs: nothing else runs while the light
//! holds a phase.

use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;

/// Blocking delay backed by the OS scheduler.
pub struct StdDelay {
    start: Instant,
}

impl Default for StdDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl StdDelay {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds since the adapter was created (monotonic).
    pub fn uptime_secs(&self) -> u64 {
        self.start.elapsed().as_secs()
    }
}

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        thread::sleep(Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
