//! Clock abstraction for wait loops.
//!
//! All timing in this crate flows through the [`Clock`] trait so the retry
//! loops can run on real wall-clock time in production and on a
//! deterministic counter in tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Monotonic time source used by the wait loops.
///
/// `now` returns elapsed time from an arbitrary fixed epoch; only
/// differences between readings are meaningful. `sleep` blocks the calling
/// thread — the loops in this crate are synchronous.
pub trait Clock: Send + Sync {
    /// Monotonic reading from the clock's epoch.
    fn now(&self) -> Duration;

    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Production clock backed by `std::time::Instant` and `std::thread::sleep`.
#[derive(Debug)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Deterministic clock for tests.
///
/// `sleep` advances the reading instead of blocking, so a wait that would
/// take seconds of wall-clock time resolves instantly while observing the
/// exact same sequence of clock readings.
#[derive(Debug, Default)]
pub struct VirtualClock {
    nanos: AtomicU64,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock manually, e.g. to model work done outside `sleep`.
    pub fn advance(&self, duration: Duration) {
        self.nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}
