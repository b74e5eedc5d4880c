//! # Active-item state machine.
//!
//! Drives the single visible item from promotion to retirement.
//!
//! ## States
//! ```text
//!            promote            pause()
//!   Idle ─────────────► Presenting ◄────────► Paused
//!    ▲                      │      resume()     │
//!    │                      │ progress == 1     │ dismiss()
//!    │                      ▼  or dismiss()     ▼
//!    └──── retire ──── Retiring ◄───────────────┘
//! ```
//!
//! ## Progress arithmetic
//! Each tick adds an increment chosen by the bound [`Action`]:
//! - `Run` adds one `tick_period`
//! - `Pause` adds nothing
//! - `Dismiss` adds the whole `dismiss_timeout`
//!
//! The raw sum is kept as an exact [`Duration`], then normalized by
//! `dismiss_timeout`, then clamped to `[0, 1]`. The order matters: clamping
//! before normalizing would change the pacing.

use std::time::Duration;

use crate::items::{ItemId, QueueItem};

/// Control signal bound to the active item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Progress advances every tick.
    Run,
    /// Progress is frozen; the item stays visible.
    Pause,
    /// The item retires on the next tick evaluation.
    Dismiss,
}

impl Action {
    /// Raw time added to the running sum by one tick under this action.
    #[inline]
    pub(crate) fn increment(self, tick_period: Duration, dismiss_timeout: Duration) -> Duration {
        match self {
            Action::Run => tick_period,
            Action::Pause => Duration::ZERO,
            Action::Dismiss => dismiss_timeout,
        }
    }

    /// Short stable label for logs.
    pub fn as_label(self) -> &'static str {
        match self {
            Action::Run => "run",
            Action::Pause => "pause",
            Action::Dismiss => "dismiss",
        }
    }
}

/// Observable phase of the display slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing is visible.
    Idle,
    /// An item is visible and its countdown runs.
    Presenting,
    /// An item is visible and its countdown is frozen.
    Paused,
    /// An item is visible and will be removed on the next evaluation.
    Retiring,
}

/// Why the active item left the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetireReason {
    /// Progress reached `1` while running.
    Expired,
    /// `dismiss()` was requested.
    Dismissed,
}

impl RetireReason {
    pub fn as_label(self) -> &'static str {
        match self {
            RetireReason::Expired => "expired",
            RetireReason::Dismissed => "dismissed",
        }
    }
}

/// Action sink bound to exactly one active item.
///
/// The serializer replaces the whole sink on every promotion and drops it on
/// retirement, so a signal addressed to a previous item can never reach the
/// current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ActionSink {
    pub item: ItemId,
    pub action: Action,
}

impl ActionSink {
    pub fn bind(item: ItemId) -> Self {
        Self {
            item,
            action: Action::Run,
        }
    }

    /// Returns `true` if a signal addressed to `target` belongs to this sink.
    ///
    /// `None` addresses whatever item is currently bound.
    #[inline]
    pub fn accepts(&self, target: Option<ItemId>) -> bool {
        target.is_none_or(|id| id == self.item)
    }
}

/// Result of evaluating one tick.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TickOutcome {
    /// Progress did not change (paused).
    Frozen,
    /// Progress changed; the new item value supersedes the old one.
    Advanced(QueueItem),
    /// Progress reached `1`; the item must retire.
    Finished(QueueItem),
}

/// The visible item plus its raw running time.
#[derive(Debug)]
pub(crate) struct ActiveItem {
    item: QueueItem,
    elapsed: Duration,
}

impl ActiveItem {
    /// Starts presenting `item` with progress reset to `0`.
    pub fn promote(item: QueueItem) -> Self {
        Self {
            item: item.with_progress(0.0),
            elapsed: Duration::ZERO,
        }
    }

    #[inline]
    pub fn item(&self) -> &QueueItem {
        &self.item
    }

    #[cfg(test)]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Evaluates one tick under `action`.
    pub fn tick(
        &mut self,
        action: Action,
        tick_period: Duration,
        dismiss_timeout: Duration,
    ) -> TickOutcome {
        let increment = action.increment(tick_period, dismiss_timeout);
        if increment.is_zero() {
            return TickOutcome::Frozen;
        }

        self.elapsed = self.elapsed.saturating_add(increment);
        self.item = self
            .item
            .with_progress(normalize(self.elapsed, dismiss_timeout));

        if self.item.is_expired() {
            TickOutcome::Finished(self.item.clone())
        } else {
            TickOutcome::Advanced(self.item.clone())
        }
    }
}

/// Raw running time as a fraction of `timeout` (unclamped).
fn normalize(elapsed: Duration, timeout: Duration) -> f64 {
    if timeout.is_zero() {
        return 1.0;
    }
    elapsed.as_secs_f64() / timeout.as_secs_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(100);
    const TIMEOUT: Duration = Duration::from_secs(5);

    fn run_ticks(active: &mut ActiveItem, action: Action, n: usize) -> Vec<TickOutcome> {
        (0..n).map(|_| active.tick(action, TICK, TIMEOUT)).collect()
    }

    #[test]
    fn test_promote_resets_progress() {
        let item = QueueItem::new("a", "info").with_progress(0.6);
        let active = ActiveItem::promote(item);
        assert_eq!(active.item().progress(), 0.0);
        assert_eq!(active.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_run_tick_increments_by_fraction() {
        let mut active = ActiveItem::promote(QueueItem::new("a", "info"));
        match active.tick(Action::Run, TICK, TIMEOUT) {
            TickOutcome::Advanced(item) => assert!((item.progress() - 0.02).abs() < 1e-12),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_expires_exactly_after_fifty_ticks() {
        let mut active = ActiveItem::promote(QueueItem::new("a", "info"));
        let outcomes = run_ticks(&mut active, Action::Run, 49);
        assert!(
            outcomes
                .iter()
                .all(|o| matches!(o, TickOutcome::Advanced(_)))
        );
        assert!(active.item().progress() < 1.0);

        match active.tick(Action::Run, TICK, TIMEOUT) {
            TickOutcome::Finished(item) => assert_eq!(item.progress(), 1.0),
            other => panic!("expected finish on tick 50, got {other:?}"),
        }
        assert_eq!(active.elapsed(), TIMEOUT);
    }

    #[test]
    fn test_progress_is_monotonic_while_running() {
        let mut active = ActiveItem::promote(QueueItem::new("a", "info"));
        let mut last = 0.0;
        for outcome in run_ticks(&mut active, Action::Run, 50) {
            let p = match outcome {
                TickOutcome::Advanced(i) | TickOutcome::Finished(i) => i.progress(),
                TickOutcome::Frozen => panic!("running item must not freeze"),
            };
            assert!(p >= last);
            last = p;
        }
    }

    #[test]
    fn test_pause_freezes_without_drift() {
        let mut active = ActiveItem::promote(QueueItem::new("a", "info"));
        run_ticks(&mut active, Action::Run, 10);
        let frozen = active.item().progress();
        assert_eq!(frozen, 0.2);

        let outcomes = run_ticks(&mut active, Action::Pause, 100);
        assert!(outcomes.iter().all(|o| *o == TickOutcome::Frozen));
        assert_eq!(active.item().progress(), frozen);
        assert_eq!(active.elapsed(), Duration::from_secs(1));
    }

    #[test]
    fn test_dismiss_finishes_on_next_tick() {
        let mut active = ActiveItem::promote(QueueItem::new("a", "info"));
        run_ticks(&mut active, Action::Run, 3);
        match active.tick(Action::Dismiss, TICK, TIMEOUT) {
            TickOutcome::Finished(item) => assert_eq!(item.progress(), 1.0),
            other => panic!("expected finish, got {other:?}"),
        }
    }

    #[test]
    fn test_sink_accepts_only_bound_item() {
        let bound = ItemId::from_raw(10);
        let sink = ActionSink::bind(bound);
        assert_eq!(sink.action, Action::Run);
        assert!(sink.accepts(None));
        assert!(sink.accepts(Some(bound)));
        assert!(!sink.accepts(Some(ItemId::from_raw(9))));
    }
}
