//! # Queue configuration.
//!
//! Provides [`QueueConfig`], the centralized settings for one queue instance.
//! Values apply to every item the queue shows; there is no per-item override.
//!
//! ## Defaults
//! - `capacity = 5` pending items (drop-oldest beyond that)
//! - `dismiss_timeout = 5s` of running time before an item expires
//! - `appear_delay = 300ms` between a free slot and the next promotion
//! - `tick_period = 100ms` between progress evaluations
//! - `bus_capacity = 1024` events in the broadcast ring buffer
//!
//! With the defaults an uninterrupted item takes exactly
//! `dismiss_timeout / tick_period = 50` ticks to expire.

use std::time::Duration;

use crate::error::QueueError;

/// Configuration for a toast queue.
///
/// ## Field semantics
/// - `capacity`: Maximum number of pending (not yet shown) items
/// - `dismiss_timeout`: Running time an item stays visible before it expires
/// - `appear_delay`: Throttle delay measured from the moment the slot frees up
/// - `tick_period`: Interval between progress evaluations of the active item
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
///
/// ## Notes
/// All fields are public. [`QueueConfig::validate`] rejects values the queue
/// cannot run with; the builder calls it before spawning anything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueConfig {
    /// Maximum number of pending items held by the intake buffer.
    ///
    /// When full, the oldest pending item is dropped to admit the new one.
    pub capacity: usize,

    /// Running time before the active item naturally expires.
    ///
    /// Paused time does not count.
    pub dismiss_timeout: Duration,

    /// Minimum wait between the slot becoming free and the next promotion.
    ///
    /// `Duration::ZERO` promotes immediately.
    pub appear_delay: Duration,

    /// Period of the progress tick while an item is visible.
    pub tick_period: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    pub bus_capacity: usize,
}

impl QueueConfig {
    /// Checks that every field holds a usable value.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use toastvisor::QueueConfig;
    ///
    /// let mut cfg = QueueConfig::default();
    /// assert!(cfg.validate().is_ok());
    ///
    /// cfg.tick_period = Duration::ZERO;
    /// assert!(cfg.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), QueueError> {
        if self.capacity == 0 {
            return Err(QueueError::InvalidConfig {
                field: "capacity",
                reason: "must be at least 1",
            });
        }
        if self.tick_period.is_zero() {
            return Err(QueueError::InvalidConfig {
                field: "tick_period",
                reason: "must be non-zero",
            });
        }
        if self.dismiss_timeout.is_zero() {
            return Err(QueueError::InvalidConfig {
                field: "dismiss_timeout",
                reason: "must be non-zero",
            });
        }
        Ok(())
    }

    /// Number of uninterrupted run ticks an item needs to expire (rounded up).
    #[inline]
    pub fn ticks_to_expire(&self) -> u64 {
        let tick = self.tick_period.as_nanos().max(1);
        let ticks = self.dismiss_timeout.as_nanos().div_ceil(tick);
        u64::try_from(ticks).unwrap_or(u64::MAX)
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: 5,
            dismiss_timeout: Duration::from_secs(5),
            appear_delay: Duration::from_millis(300),
            tick_period: Duration::from_millis(100),
            bus_capacity: 1024,
        }
    }
}
