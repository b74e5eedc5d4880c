//! Queue core: state machine and runtime.
//!
//! The pure pieces hold no clocks or tasks and are driven with explicit instants:
//! - [`intake`]: bounded drop-oldest FIFO of pending items;
//! - [`throttle`]: delay between a free slot and the next promotion;
//! - [`active`]: per-item progress, actions and retirement;
//! - [`serializer`]: owns the slot and the action sink, coordinates the above.
//!
//! The runtime pieces wire them onto tokio:
//! - [`actor`]: the single task that owns the serializer;
//! - [`handle`]: [`ToastQueue`] and its cloneable [`QueueHandle`];
//! - [`builder`]: validation, bus, subscribers, spawn;
//! - [`config`]: [`QueueConfig`].

mod active;
mod actor;
mod builder;
mod config;
mod handle;
mod intake;
mod serializer;
mod throttle;

#[cfg(test)]
mod tests;

pub use active::{Action, Phase, RetireReason};
pub use builder::ToastQueueBuilder;
pub use config::QueueConfig;
pub use handle::{QueueHandle, ToastQueue};
