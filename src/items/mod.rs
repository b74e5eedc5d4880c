//! # Queue payloads and render-facing snapshots.
//!
//! This module provides the value types that cross the queue boundary:
//! - [`QueueItem`] - one toast (id, text, icon, progress)
//! - [`ItemId`] - opaque unique identifier of an item
//! - [`Presentation`] - what the render surface should show right now
//! - [`Transition`] - animation class attached to each presentation change

mod item;
mod presentation;

pub use item::{ItemId, QueueItem};
pub use presentation::{Presentation, Transition};
