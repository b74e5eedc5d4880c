//! # Event subscribers for the queue runtime.
//!
//! This module provides the [`Subscribe`] trait and the [`SubscriberSet`] that
//! fans queue events out to subscribers through per-subscriber bounded queues.
//!
//! ## Architecture
//! ```text
//! QueueActor ── publish(Event) ──► Bus ──► listener ──► SubscriberSet::emit(&Event)
//!                                                          │
//!                                                 ┌────────┼─────────┐
//!                                                 ▼        ▼         ▼
//!                                             LogWriter  Metrics   Custom
//! ```
//!
//! The render surface is **not** a subscriber: it watches
//! [`Presentation`](crate::Presentation) snapshots, which never lag or drop.
//! Subscribers are for observability.

#[cfg(feature = "logging")]
mod log;
mod subscribe;
mod subscriber_set;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use subscribe::Subscribe;
pub use subscriber_set::SubscriberSet;
