//! # toastvisor
//!
//! **Toastvisor** is a serial presentation queue for transient notifications
//! ("toasts").
//!
//! Toasts arrive asynchronously from anywhere in an application; the queue
//! buffers them, throttles their appearance, counts down each one's visible
//! time, and supports pause/resume/dismiss, while only ever showing **one**
//! toast at a time. Rendering is left to the caller: a render surface watches
//! a [`Presentation`] and draws the current item (or nothing).
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   add(text, icon)      pause() / resume() / dismiss()      subscribe()
//!        │                          │                            ▲
//!        ▼                          ▼                            │
//! ┌───────────────────────────────────────────────┐    ┌─────────┴─────────┐
//! │ QueueHandle (cloneable, never blocks)         │    │ watch<Presentation>│
//! └──────────────────────┬────────────────────────┘    └─────────▲─────────┘
//!                        │ unbounded mpsc<Command>               │
//!                        ▼                                       │
//! ┌───────────────────────────────────────────────────────────────┴───┐
//! │ QueueActor (one tokio task)                                        │
//! │   Serializer                                                       │
//! │    ├─ IntakeBuffer   bounded FIFO, drop-oldest       (capacity)    │
//! │    ├─ Throttle       delay after the slot frees up   (appear_delay)│
//! │    └─ Slot           ActiveItem + ActionSink         (tick_period) │
//! └──────────────────────────────┬─────────────────────────────────────┘
//!                                │ publish(Event)
//!                                ▼
//!                     Bus (broadcast) ──► SubscriberSet ──► LogWriter, custom...
//! ```
//!
//! ### Lifecycle of one toast
//! ```text
//! add ──► pending ──(slot free ≥ appear_delay)──► Appear (progress 0)
//!           │                                        │ tick: progress += tick/timeout
//!           └─ evicted when full (ItemDropped)       │ pause: frozen / resume: runs
//!                                                    │ dismiss: retires on next tick
//!                                                    ▼
//!                                       progress == 1 ──► Disappear
//! ```
//!
//! ## Features
//! | Area              | Description                                                 | Key types / traits                       |
//! |-------------------|-------------------------------------------------------------|------------------------------------------|
//! | **Queue**         | Submit and control toasts; at most one visible.             | [`ToastQueue`], [`QueueHandle`]          |
//! | **Items**         | Immutable payloads with clamped progress.                   | [`QueueItem`], [`ItemId`]                |
//! | **Rendering**     | Latest-value snapshot with animation class.                 | [`Presentation`], [`Transition`], [`Phase`] |
//! | **Events**        | Ordered lifecycle events on a broadcast bus.                | [`Event`], [`EventKind`], [`Bus`]        |
//! | **Subscriber API**| Hook into events without blocking the queue.                | [`Subscribe`], [`SubscriberSet`]         |
//! | **Configuration** | Capacity, timeout, throttle and tick period.                | [`QueueConfig`]                          |
//! | **Errors**        | Config validation and actor failure.                        | [`QueueError`]                           |
//!
//! ## Optional features
//! - `logging` (default): exports [`LogWriter`], a subscriber that renders events through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use toastvisor::{EventKind, QueueConfig, ToastQueue};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = QueueConfig {
//!         dismiss_timeout: Duration::from_millis(500),
//!         appear_delay: Duration::from_millis(50),
//!         ..QueueConfig::default()
//!     };
//!     let queue = ToastQueue::builder(cfg).build()?;
//!     let mut events = queue.events();
//!
//!     queue.add("Copied to clipboard", "doc.on.doc");
//!     queue.add("Saved", "checkmark");
//!
//!     let mut shown = Vec::new();
//!     while shown.len() < 2 {
//!         let ev = events.recv().await?;
//!         if ev.kind == EventKind::ItemPresented {
//!             shown.push(ev.text.as_deref().unwrap_or_default().to_string());
//!         }
//!     }
//!     assert_eq!(shown, ["Copied to clipboard", "Saved"]);
//!
//!     queue.shutdown().await?;
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod items;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{
    Action, Phase, QueueConfig, QueueHandle, RetireReason, ToastQueue, ToastQueueBuilder,
};
pub use error::QueueError;
pub use events::{Bus, Event, EventKind};
pub use items::{ItemId, Presentation, QueueItem, Transition};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose the tracing-backed logger subscriber.
// Enabled by default with the `logging` feature.
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
