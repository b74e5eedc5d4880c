//! # Presentation throttle.
//!
//! Enforces a fixed delay between the display slot becoming free and the next
//! promotion, so back-to-back items do not flicker.
//!
//! ```text
//! slot free ──► [appear_delay] ──► ready
//!     ▲                               │
//!  release(now)                   occupy()
//! ```
//!
//! The delay is measured from slot availability, not from submission time: an
//! item arriving after the slot has been free longer than the delay is ready
//! immediately.

use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug)]
pub(crate) struct Throttle {
    delay: Duration,
    /// Instant the slot became free; `None` while an item occupies it.
    free_since: Option<Instant>,
}

impl Throttle {
    /// Creates a throttle whose slot is free since `now`.
    pub fn new(delay: Duration, now: Instant) -> Self {
        Self {
            delay,
            free_since: Some(now),
        }
    }

    /// Marks the slot as occupied.
    pub fn occupy(&mut self) {
        self.free_since = None;
    }

    /// Marks the slot as free from `now` on; the delay restarts.
    pub fn release(&mut self, now: Instant) {
        self.free_since = Some(now);
    }

    /// Instant from which a promotion is allowed, `None` while occupied.
    pub fn ready_at(&self) -> Option<Instant> {
        self.free_since.map(|since| since + self.delay)
    }

    pub fn is_ready(&self, now: Instant) -> bool {
        self.ready_at().is_some_and(|at| now >= at)
    }
}
