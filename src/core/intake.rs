//! # Intake buffer: bounded FIFO of pending items.
//!
//! Holds items that were submitted but not yet promoted to the display slot.
//!
//! ## Rules
//! - `push` never blocks and never fails
//! - when full, the **oldest** pending item is evicted before appending
//! - `pop` yields items in strict arrival order
//! - an evicted item is gone for good: it will never be shown

use std::collections::VecDeque;

use crate::items::QueueItem;

/// Bounded drop-oldest FIFO owned by the serializer.
#[derive(Debug)]
pub(crate) struct IntakeBuffer {
    items: VecDeque<QueueItem>,
    capacity: usize,
}

impl IntakeBuffer {
    /// Creates an empty buffer; capacity is clamped to a minimum of 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `item`, returning the evicted oldest item if the buffer was full.
    pub fn push(&mut self, item: QueueItem) -> Option<QueueItem> {
        let evicted = if self.items.len() >= self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    /// Removes and returns the oldest pending item.
    pub fn pop(&mut self) -> Option<QueueItem> {
        self.items.pop_front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
