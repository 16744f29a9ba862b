//! Time sources for the sampling loop
//!
//! Provides clock implementations for the [`TimeSource`] seam:
//! - Fixed clock (tests, software-in-loop runs)
//! - System monotonic clock (when `std` is available)
//!
//! Firmware supplies its own implementation backed by a hardware timer.

use core::cell::Cell;

pub use crate::traits::TimeSource;

/// Timestamp in microseconds since device boot
pub type Timestamp = u64;

/// Manually driven time source
///
/// Uses interior mutability so a test can keep advancing the clock while an
/// [`EngineSensors`](crate::engine::EngineSensors) holds a shared reference
/// to it.
#[derive(Debug, Clone, Default)]
pub struct FixedTime {
    timestamp: Cell<Timestamp>,
}

impl FixedTime {
    /// Clock stopped at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp: Cell::new(timestamp) }
    }

    /// Jump to an absolute time
    pub fn set(&self, timestamp: Timestamp) {
        self.timestamp.set(timestamp);
    }

    /// Move forward by `micros`, saturating at `u64::MAX`
    pub fn advance(&self, micros: u64) {
        self.timestamp.set(self.timestamp.get().saturating_add(micros));
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp.get()
    }
}

/// Monotonic clock measuring from its own creation (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Clock reading 0 now
    pub fn new() -> Self {
        Self { start: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for SystemClock {
    fn now(&self) -> Timestamp {
        // u64 microseconds covers ~584k years of uptime
        self.start.elapsed().as_micros() as Timestamp
    }
}

/// Microseconds elapsed from `earlier` to `later`, if strictly positive
pub fn positive_interval(earlier: Timestamp, later: Timestamp) -> Option<u64> {
    later.checked_sub(earlier).filter(|&delta| delta > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_time_advances() {
        let time = FixedTime::new(1000);
        assert_eq!(time.now(), 1000);

        time.advance(500);
        assert_eq!(time.now(), 1500);

        time.set(42);
        assert_eq!(time.now(), 42);
    }

    #[test]
    fn interval_must_be_positive() {
        assert_eq!(positive_interval(1000, 1500), Some(500));
        assert_eq!(positive_interval(1000, 1000), None);
        assert_eq!(positive_interval(1500, 1000), None);
    }

    #[cfg(feature = "std")]
    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
