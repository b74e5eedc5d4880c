//! # Toast payload.
//!
//! A [`QueueItem`] is immutable except for its progress. Progress is never
//! mutated in place: [`QueueItem::with_progress`] returns a new value that
//! supersedes the old one.
//!
//! ## Rules
//! - `progress` is always in `[0, 1]` (clamped on every write, NaN stored as `0`)
//! - `progress == 1` means the item has naturally expired
//! - ids are unique for the lifetime of the process
//!
//! ## Example
//! ```rust
//! use toastvisor::QueueItem;
//!
//! let item = QueueItem::new("Saved", "checkmark");
//! assert_eq!(item.progress(), 0.0);
//!
//! let later = item.with_progress(1.7);
//! assert_eq!(later.progress(), 1.0);
//! assert_eq!(later.id(), item.id());
//! assert!(later.is_expired());
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Global counter for generated item ids.
static ITEM_SEQ: AtomicU64 = AtomicU64::new(1);

/// Opaque unique identifier of a [`QueueItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    /// Allocates the next process-wide id.
    pub fn next() -> Self {
        Self(ITEM_SEQ.fetch_add(1, AtomicOrdering::Relaxed))
    }

    /// Wraps a caller-chosen raw id.
    ///
    /// Callers mixing raw and generated ids are responsible for uniqueness.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// A transient notification payload shown for a bounded time.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueItem {
    id: ItemId,
    text: Arc<str>,
    icon: Arc<str>,
    progress: f64,
}

impl QueueItem {
    /// Creates a new item with a freshly generated id and zero progress.
    pub fn new(text: impl Into<Arc<str>>, icon: impl Into<Arc<str>>) -> Self {
        Self::with_id(ItemId::next(), text, icon)
    }

    /// Creates a new item with a caller-supplied id and zero progress.
    pub fn with_id(id: ItemId, text: impl Into<Arc<str>>, icon: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            text: text.into(),
            icon: icon.into(),
            progress: 0.0,
        }
    }

    /// Returns a copy of this item carrying the given progress (clamped to `[0, 1]`).
    #[must_use]
    pub fn with_progress(&self, progress: f64) -> Self {
        Self {
            id: self.id,
            text: Arc::clone(&self.text),
            icon: Arc::clone(&self.icon),
            progress: clamp_unit(progress),
        }
    }

    #[inline]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Dismiss-countdown completion fraction in `[0, 1]`.
    #[inline]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Returns `true` once progress has reached `1`.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.progress >= 1.0
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = QueueItem::new("a", "info");
        let b = QueueItem::new("b", "info");
        assert_ne!(a.id(), b.id());
        assert!(b.id() > a.id());
    }

    #[test]
    fn test_progress_is_clamped_on_write() {
        let item = QueueItem::new("x", "info");
        assert_eq!(item.with_progress(-0.5).progress(), 0.0);
        assert_eq!(item.with_progress(0.25).progress(), 0.25);
        assert_eq!(item.with_progress(42.0).progress(), 1.0);
        assert_eq!(item.with_progress(f64::INFINITY).progress(), 1.0);
        assert_eq!(item.with_progress(f64::NAN).progress(), 0.0);
    }

    #[test]
    fn test_with_progress_keeps_identity_and_payload() {
        let item = QueueItem::with_id(ItemId::from_raw(7), "Copied", "doc.on.doc");
        let next = item.with_progress(0.5);
        assert_eq!(next.id(), ItemId::from_raw(7));
        assert_eq!(next.text(), "Copied");
        assert_eq!(next.icon(), "doc.on.doc");
        assert_eq!(item.progress(), 0.0, "source item must be untouched");
    }

    #[test]
    fn test_display_id() {
        assert_eq!(ItemId::from_raw(3).to_string(), "toast-3");
    }
}
