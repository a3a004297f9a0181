//! Autoplay timer.
//!
//! Time is passed in by the caller, so the timer is a single optional
//! deadline rather than a background thread. Resetting replaces the
//! deadline; there is never more than one pending.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct AutoAdvance {
    delay: Duration,
    deadline: Option<Instant>,
}

impl AutoAdvance {
    /// A stopped timer; nothing fires until [`reset`](Self::reset).
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancel any pending deadline and start a full delay from `now`.
    pub fn reset(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }
}
