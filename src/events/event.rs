//! # Runtime events emitted by the queue actor.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Intake events**: what happened to a submission (accepted, dropped)
//! - **Slot events**: what happened to the visible item (presented, progressed, controlled, retired)
//! - **Runtime events**: subscriber health and actor shutdown
//!
//! The [`Event`] struct carries the optional metadata relevant to its kind.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! All slot events come from one actor task, so their `seq` order is the order the
//! transitions happened in.
//!
//! ## Example
//! ```rust
//! use toastvisor::{Event, EventKind, QueueItem};
//!
//! let item = QueueItem::new("Saved", "checkmark");
//! let ev = Event::new(EventKind::ItemPresented)
//!     .with_item(&item)
//!     .with_pending(2);
//!
//! assert_eq!(ev.kind, EventKind::ItemPresented);
//! assert_eq!(ev.item, Some(item.id()));
//! assert_eq!(ev.text.as_deref(), Some("Saved"));
//! assert_eq!(ev.pending, Some(2));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::core::{Action, RetireReason};
use crate::items::{ItemId, QueueItem};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Intake events ===
    /// Item accepted into the intake buffer.
    ///
    /// Sets:
    /// - `item`, `text`: submitted item
    /// - `pending`: buffer length after the push
    ItemSubmitted,

    /// Oldest pending item evicted because the buffer was full.
    ///
    /// Sets:
    /// - `item`, `text`: evicted item
    /// - `reason`: `"overflow"`
    ItemDropped,

    // === Slot events ===
    /// Item promoted to the display slot (appear).
    ///
    /// Sets:
    /// - `item`, `text`, `progress` (always `0`)
    /// - `pending`: buffer length after the pop
    ItemPresented,

    /// Active item's progress advanced (update).
    ///
    /// Sets:
    /// - `item`, `progress`
    ItemProgressed,

    /// Active item's action sink switched.
    ///
    /// Sets:
    /// - `item`
    /// - `action`: new action (`Run` after resume, `Pause`, `Dismiss`)
    ItemControlled,

    /// Active item left the slot (disappear).
    ///
    /// Sets:
    /// - `item`, `text`, `progress`
    /// - `retire_reason`: expired or dismissed
    ItemRetired,

    // === Runtime events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `subscriber`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `subscriber`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    SubscriberOverflow,

    /// Queue actor stopped (cancelled or every handle dropped).
    ///
    /// Sets:
    /// - `pending`: items still buffered and never shown
    QueueStopped,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Id of the item the event is about.
    pub item: Option<ItemId>,
    /// Display text of the item (kept for logs).
    pub text: Option<Arc<str>>,
    /// Progress of the item at the time of the event.
    pub progress: Option<f64>,
    /// Intake buffer length after the operation.
    pub pending: Option<usize>,
    /// Action the sink switched to.
    pub action: Option<Action>,
    /// Why an item retired.
    pub retire_reason: Option<RetireReason>,
    /// Name of the subscriber (runtime events only).
    pub subscriber: Option<&'static str>,
    /// Human-readable reason (overflow details, panic info, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            item: None,
            text: None,
            progress: None,
            pending: None,
            action: None,
            retire_reason: None,
            subscriber: None,
            reason: None,
        }
    }

    /// Attaches id, text and progress of `item`.
    #[inline]
    pub fn with_item(mut self, item: &QueueItem) -> Self {
        self.item = Some(item.id());
        self.text = Some(Arc::from(item.text()));
        self.progress = Some(item.progress());
        self
    }

    /// Attaches only the id (no payload copy).
    #[inline]
    pub fn with_item_id(mut self, id: ItemId) -> Self {
        self.item = Some(id);
        self
    }

    /// Attaches the progress value alone.
    #[inline]
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Attaches the intake buffer length.
    #[inline]
    pub fn with_pending(mut self, pending: usize) -> Self {
        self.pending = Some(pending);
        self
    }

    #[inline]
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    #[inline]
    pub fn with_retire_reason(mut self, reason: RetireReason) -> Self {
        self.retire_reason = Some(reason);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        let mut ev = Event::new(EventKind::SubscriberOverflow)
            .with_reason(format!("subscriber={subscriber} reason={reason}"));
        ev.subscriber = Some(subscriber);
        ev
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        let mut ev = Event::new(EventKind::SubscriberPanicked).with_reason(info);
        ev.subscriber = Some(subscriber);
        ev
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }
}
