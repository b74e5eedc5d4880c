//! # Serializer: single owner of the display slot.
//!
//! Coordinates the [`IntakeBuffer`], the [`Throttle`] and the active-item
//! state machine. It is pure state: every method takes the current instant
//! from the caller and returns the [`Step`]s it produced, so the same logic is
//! driven by the tokio actor in production and by plain loops in tests.
//!
//! ## Pipeline
//! ```text
//! submit(item) ──► IntakeBuffer ──(slot free && throttle ready)──► promote()
//!                  (drop-oldest)                                      │
//!                                                                     ▼
//!                  control(action) ──► ActionSink ──► tick() ──► ActiveItem
//!                                                                     │
//!                                   Throttle::release(now) ◄── retire ┘
//! ```
//!
//! ## Invariants
//! - at most one item occupies the slot; `promote` is a no-op while occupied
//! - items are promoted in arrival order among those still pending
//! - the action sink is rebound on every promotion and dropped on retirement
//! - control signals are no-ops when idle or addressed to another item

use std::time::Duration;

use tokio::time::Instant;

use crate::core::{
    active::{Action, ActionSink, ActiveItem, Phase, RetireReason, TickOutcome},
    config::QueueConfig,
    intake::IntakeBuffer,
    throttle::Throttle,
};
use crate::items::{ItemId, QueueItem};

/// Observable effect of one serializer operation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Step {
    /// Item accepted into the intake buffer.
    Submitted { item: QueueItem, pending: usize },
    /// Oldest pending item evicted by overflow; it will never be shown.
    Dropped { item: QueueItem },
    /// Item promoted to the display slot with progress `0`.
    Presented { item: QueueItem, pending: usize },
    /// Active item's progress changed.
    Progressed { item: QueueItem },
    /// Action sink of the active item switched to `action`.
    Controlled { item: ItemId, action: Action },
    /// Active item left the slot.
    Retired {
        item: QueueItem,
        reason: RetireReason,
    },
}

/// The visible item together with the sink bound to it.
#[derive(Debug)]
struct Slot {
    active: ActiveItem,
    sink: ActionSink,
}

/// Queue state machine; see module docs.
#[derive(Debug)]
pub(crate) struct Serializer {
    tick_period: Duration,
    dismiss_timeout: Duration,
    intake: IntakeBuffer,
    throttle: Throttle,
    slot: Option<Slot>,
}

impl Serializer {
    /// Creates an idle serializer whose slot is free since `now`.
    pub fn new(cfg: &QueueConfig, now: Instant) -> Self {
        Self {
            tick_period: cfg.tick_period,
            dismiss_timeout: cfg.dismiss_timeout,
            intake: IntakeBuffer::new(cfg.capacity),
            throttle: Throttle::new(cfg.appear_delay, now),
            slot: None,
        }
    }

    /// Buffers `item`; reports an eviction first if the buffer was full.
    pub fn submit(&mut self, item: QueueItem) -> Vec<Step> {
        let mut steps = Vec::with_capacity(2);
        if let Some(evicted) = self.intake.push(item.clone()) {
            steps.push(Step::Dropped { item: evicted });
        }
        steps.push(Step::Submitted {
            item,
            pending: self.intake.len(),
        });
        steps
    }

    /// Routes `action` to the bound sink.
    ///
    /// Returns `None` when idle, when `target` names another item, when the
    /// action is already in effect, or when a dismissal is already pending.
    pub fn control(&mut self, action: Action, target: Option<ItemId>) -> Option<Step> {
        let slot = self.slot.as_mut()?;
        if !slot.sink.accepts(target) {
            return None;
        }
        if slot.sink.action == Action::Dismiss || slot.sink.action == action {
            return None;
        }

        slot.sink = ActionSink {
            item: slot.sink.item,
            action,
        };
        Some(Step::Controlled {
            item: slot.sink.item,
            action,
        })
    }

    /// Evaluates one tick of the active item at `now`.
    pub fn tick(&mut self, now: Instant) -> Option<Step> {
        let slot = self.slot.as_mut()?;
        let action = slot.sink.action;

        match slot
            .active
            .tick(action, self.tick_period, self.dismiss_timeout)
        {
            TickOutcome::Frozen => None,
            TickOutcome::Advanced(item) => Some(Step::Progressed { item }),
            TickOutcome::Finished(item) => {
                let reason = match action {
                    Action::Dismiss => RetireReason::Dismissed,
                    Action::Run | Action::Pause => RetireReason::Expired,
                };
                self.slot = None;
                self.throttle.release(now);
                Some(Step::Retired { item, reason })
            }
        }
    }

    /// Promotes the oldest pending item if the slot is free and the throttle allows it.
    pub fn promote(&mut self, now: Instant) -> Option<Step> {
        if self.slot.is_some() || !self.throttle.is_ready(now) {
            return None;
        }
        let next = self.intake.pop()?;
        let active = ActiveItem::promote(next);
        let item = active.item().clone();

        self.throttle.occupy();
        self.slot = Some(Slot {
            sink: ActionSink::bind(item.id()),
            active,
        });
        Some(Step::Presented {
            item,
            pending: self.intake.len(),
        })
    }

    /// Instant at which `promote` would succeed, if something is waiting for the slot.
    pub fn next_promotion_at(&self) -> Option<Instant> {
        if self.slot.is_some() || self.intake.is_empty() {
            return None;
        }
        self.throttle.ready_at()
    }

    /// Latest value of the visible item.
    pub fn current(&self) -> Option<&QueueItem> {
        self.slot.as_ref().map(|s| s.active.item())
    }

    pub fn phase(&self) -> Phase {
        match &self.slot {
            None => Phase::Idle,
            Some(slot) => match slot.sink.action {
                Action::Run => Phase::Presenting,
                Action::Pause => Phase::Paused,
                Action::Dismiss => Phase::Retiring,
            },
        }
    }

    #[inline]
    pub fn pending(&self) -> usize {
        self.intake.len()
    }
}
