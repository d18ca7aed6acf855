use std::thread;
use std::time::{Duration, Instant};

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Paces a loop to a fixed interval.
///
/// Deadlines are scheduled from the previous deadline rather than from when
/// `wait` returns, so time spent handling a tick doesn't accumulate as drift.
pub struct Ticker {
    interval: Duration,
    next_deadline: Instant,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_deadline: Instant::now() + interval,
        }
    }

    /// Block until the next tick is due
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.next_deadline > now {
            thread::sleep(self.next_deadline - now);
        }
        self.next_deadline += self.interval;

        // Fell more than a whole interval behind (e.g. suspended); don't burst
        let now = Instant::now();
        if self.next_deadline + self.interval < now {
            self.next_deadline = now + self.interval;
        }
    }
}
