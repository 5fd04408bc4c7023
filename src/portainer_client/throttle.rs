// Minimum-interval gate for refresh attempts.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Lets at most one attempt through per `interval`, measured from the last attempt
/// that was let through (successful or not).
#[derive(Debug)]
pub(crate) struct Throttle {
    interval: Duration,
    last_attempt: Mutex<Option<Instant>>,
}

impl Throttle {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_attempt: Mutex::new(None),
        }
    }

    /// Returns true and records `now` when the cooldown has elapsed; false otherwise.
    pub(crate) fn try_acquire(&self) -> bool {
        let now = Instant::now();
        let mut last = self
            .last_attempt
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match *last {
            Some(prev) if now.duration_since(prev) < self.interval => false,
            _ => {
                *last = Some(now);
                true
            }
        }
    }
}
