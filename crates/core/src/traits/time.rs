//! Time abstraction for the sensor loop.
//!
//! Boards expose a free-running 32-bit millisecond clock (it wraps after
//! roughly 49.7 days), plus a wider microsecond counter used for IMU
//! timestamps. All deadline arithmetic goes through [`TimeSource::millis_since`]
//! so wraparound never produces a spurious timeout.

use core::cell::Cell;

/// Platform-agnostic time source.
///
/// # Example
///
/// ```
/// use kestrel_core::traits::{MockTime, TimeSource};
///
/// fn stale<T: TimeSource>(time: &T, last_ms: u32) -> bool {
///     time.millis_since(last_ms) > 1000
/// }
///
/// let time = MockTime::new();
/// time.advance_ms(1001);
/// assert!(stale(&time, 0));
/// ```
pub trait TimeSource {
    /// Milliseconds since boot, wrapping at `u32::MAX`.
    fn now_ms(&self) -> u32;

    /// Microseconds since boot.
    fn now_us(&self) -> u64;

    /// Milliseconds elapsed since `reference_ms`, tolerant of one wrap.
    fn millis_since(&self, reference_ms: u32) -> u32 {
        self.now_ms().wrapping_sub(reference_ms)
    }
}

/// Mock time source with manual advancement.
///
/// ```
/// use kestrel_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// time.advance_ms(5);
/// assert_eq!(time.now_ms(), 5);
/// assert_eq!(time.now_us(), 5_000);
/// ```
#[derive(Debug, Default)]
pub struct MockTime {
    current_us: Cell<u64>,
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self {
            current_us: Cell::new(0),
        }
    }

    /// Creates a new `MockTime` starting at the given millisecond count.
    pub fn with_initial_ms(ms: u32) -> Self {
        Self {
            current_us: Cell::new(ms as u64 * 1000),
        }
    }

    /// Sets the current time in milliseconds.
    pub fn set_ms(&self, ms: u32) {
        self.current_us.set(ms as u64 * 1000);
    }

    /// Advances the clock by `ms` milliseconds.
    pub fn advance_ms(&self, ms: u32) {
        self.current_us.set(self.current_us.get() + ms as u64 * 1000);
    }

    /// Advances the clock by `us` microseconds.
    pub fn advance_us(&self, us: u64) {
        self.current_us.set(self.current_us.get() + us);
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u32 {
        (self.current_us.get() / 1000) as u32
    }

    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}
