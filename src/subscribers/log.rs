//! # LogWriter: events rendered through `tracing`
//!
//! A subscriber that turns queue events into structured `tracing` records.
//! Per-tick progress is logged at `trace`, slot transitions at `debug`, and
//! drops/subscriber failures at `warn`.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! DEBUG toastvisor: submitted item=toast-1 text="Saved" pending=1
//! DEBUG toastvisor: presented item=toast-1 text="Saved" pending=0
//! TRACE toastvisor: progressed item=toast-1 progress=0.02
//! DEBUG toastvisor: controlled item=toast-1 action="pause"
//!  WARN toastvisor: dropped item=toast-2 text="Copied"
//! DEBUG toastvisor: retired item=toast-1 reason="expired"
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let item = e.item.map(|id| id.to_string());
        let item = item.as_deref().unwrap_or("-");
        let text = e.text.as_deref().unwrap_or("");

        match e.kind {
            EventKind::ItemSubmitted => {
                tracing::debug!(target: "toastvisor", item, text, pending = e.pending, "submitted");
            }
            EventKind::ItemDropped => {
                tracing::warn!(target: "toastvisor", item, text, "dropped");
            }
            EventKind::ItemPresented => {
                tracing::debug!(target: "toastvisor", item, text, pending = e.pending, "presented");
            }
            EventKind::ItemProgressed => {
                tracing::trace!(target: "toastvisor", item, progress = e.progress, "progressed");
            }
            EventKind::ItemControlled => {
                tracing::debug!(
                    target: "toastvisor",
                    item,
                    action = e.action.map(|a| a.as_label()),
                    "controlled"
                );
            }
            EventKind::ItemRetired => {
                tracing::debug!(
                    target: "toastvisor",
                    item,
                    reason = e.retire_reason.map(|r| r.as_label()),
                    "retired"
                );
            }
            EventKind::SubscriberOverflow => {
                tracing::warn!(
                    target: "toastvisor",
                    subscriber = e.subscriber,
                    reason = e.reason.as_deref(),
                    "subscriber-overflow"
                );
            }
            EventKind::SubscriberPanicked => {
                tracing::warn!(
                    target: "toastvisor",
                    subscriber = e.subscriber.unwrap_or("unknown"),
                    info = e.reason.as_deref().unwrap_or("unknown"),
                    "subscriber-panicked"
                );
            }
            EventKind::QueueStopped => {
                tracing::debug!(target: "toastvisor", pending = e.pending, "stopped");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
