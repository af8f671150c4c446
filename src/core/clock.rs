//! Time source for the fetch pipeline.

use std::time::Duration;

/// Wall-clock reads and the retry wait. `Send` so the context can move into
/// the scheduler's blocking pool.
pub trait Clock: Send {
    /// Wall-clock time in epoch seconds.
    fn unix_now(&self) -> i64;
    fn sleep(&self, d: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }

    fn sleep(&self, d: Duration) {
        std::thread::sleep(d);
    }
}
