//! # Render-facing snapshot.
//!
//! The queue publishes a [`Presentation`] every time the visible slot changes.
//! A render surface only needs the latest value: it draws `current` (or nothing)
//! and picks an animation from `transition`.
//!
//! ## Transition classes
//! ```text
//! Idle ──promote──► Appear ──tick──► Update ──tick──► ... ──retire──► Disappear
//! ```
//! - `Appear`: a new item became visible (progress `0`)
//! - `Update`: the visible item's progress changed in place (fast transition)
//! - `Disappear`: the slot was cleared (`current == None`)
//!
//! Pausing or resuming republishes the same item with a new `phase` and an
//! `Update` transition.

use crate::core::Phase;
use crate::items::QueueItem;

/// Animation class attached to a presentation change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A newly promoted item is shown.
    Appear,
    /// The shown item's progress changed.
    Update,
    /// The shown item was retired; nothing is visible.
    Disappear,
}

/// Snapshot of the display slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    /// Publish counter, starts at `0` and grows by one per change.
    pub seq: u64,
    /// Item currently occupying the slot, `None` when idle.
    pub current: Option<QueueItem>,
    /// Phase of the slot (running, paused, retiring, idle).
    pub phase: Phase,
    /// Animation class for reaching this state.
    pub transition: Transition,
}

impl Presentation {
    /// The empty slot published before anything was shown.
    pub fn idle() -> Self {
        Self {
            seq: 0,
            current: None,
            phase: Phase::Idle,
            transition: Transition::Disappear,
        }
    }

    /// Builds the successor of `self`.
    pub(crate) fn next(
        &self,
        current: Option<QueueItem>,
        phase: Phase,
        transition: Transition,
    ) -> Self {
        Self {
            seq: self.seq.wrapping_add(1),
            current,
            phase,
            transition,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::idle()
    }
}
