//! # Public queue surface.
//!
//! [`ToastQueue`] owns the running actor; [`QueueHandle`] is the cheap, cloneable
//! front used by callers and render surfaces.
//!
//! ## Operations
//! - `add` / `add_item`: enqueue; never blocks, never fails
//! - `pause` / `resume` / `dismiss`: act on whatever is visible; no-op when idle
//! - `pause_item` / `resume_item` / `dismiss_item`: act only if `id` is visible
//! - `current` / `subscribe`: the latest [`Presentation`]
//! - `events`: raw [`Event`] stream
//!
//! ## Example
//! ```rust
//! use toastvisor::{ToastQueue, Transition};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let queue = ToastQueue::with_defaults();
//!     let mut view = queue.subscribe();
//!
//!     let id = queue.add("Saved", "checkmark");
//!     let shown = view.wait_for(|p| p.current.is_some()).await?.clone();
//!     assert_eq!(shown.transition, Transition::Appear);
//!     assert_eq!(shown.current.map(|i| i.id()), Some(id));
//!
//!     queue.dismiss();
//!     view.wait_for(|p| p.is_idle()).await?;
//!
//!     queue.shutdown().await?;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tokio::{
    sync::{broadcast, mpsc, watch},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

use crate::core::{
    active::Action,
    actor::Command,
    builder::{Listener, ToastQueueBuilder},
    config::QueueConfig,
};
use crate::error::QueueError;
use crate::events::{Bus, Event};
use crate::items::{ItemId, Presentation, QueueItem};

/// Cloneable front of a running queue.
///
/// Every method returns immediately. Once the queue has stopped, commands are
/// discarded and the last presentation stays readable.
#[derive(Clone, Debug)]
pub struct QueueHandle {
    tx: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<Presentation>,
    bus: Bus,
}

impl QueueHandle {
    pub(crate) fn new(
        tx: mpsc::UnboundedSender<Command>,
        state: watch::Receiver<Presentation>,
        bus: Bus,
    ) -> Self {
        Self { tx, state, bus }
    }

    /// Enqueues a new item built from `text` and `icon`; returns its id.
    pub fn add(&self, text: impl Into<Arc<str>>, icon: impl Into<Arc<str>>) -> ItemId {
        self.add_item(QueueItem::new(text, icon))
    }

    /// Enqueues a prepared item; returns its id.
    ///
    /// If the intake buffer is full, the oldest pending item is dropped.
    pub fn add_item(&self, item: QueueItem) -> ItemId {
        let id = item.id();
        self.send(Command::Submit(item));
        id
    }

    /// Freezes the visible item's countdown.
    pub fn pause(&self) {
        self.control(Action::Pause, None);
    }

    /// Resumes the visible item's countdown.
    pub fn resume(&self) {
        self.control(Action::Run, None);
    }

    /// Retires the visible item on the next tick.
    pub fn dismiss(&self) {
        self.control(Action::Dismiss, None);
    }

    /// Like [`pause`](Self::pause), but only if `id` is still the visible item.
    pub fn pause_item(&self, id: ItemId) {
        self.control(Action::Pause, Some(id));
    }

    /// Like [`resume`](Self::resume), but only if `id` is still the visible item.
    pub fn resume_item(&self, id: ItemId) {
        self.control(Action::Run, Some(id));
    }

    /// Like [`dismiss`](Self::dismiss), but only if `id` is still the visible item.
    pub fn dismiss_item(&self, id: ItemId) {
        self.control(Action::Dismiss, Some(id));
    }

    /// Latest value of the visible item, `None` when idle.
    pub fn current(&self) -> Option<QueueItem> {
        self.state.borrow().current.clone()
    }

    /// Latest full presentation snapshot.
    pub fn presentation(&self) -> Presentation {
        self.state.borrow().clone()
    }

    /// Receiver notified on every presentation change (for render surfaces).
    pub fn subscribe(&self) -> watch::Receiver<Presentation> {
        self.state.clone()
    }

    /// Receiver of raw queue events published after this call.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Returns `true` once the actor has stopped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn control(&self, action: Action, target: Option<ItemId>) {
        self.send(Command::Control { action, target });
    }

    fn send(&self, cmd: Command) {
        if let Err(mpsc::error::SendError(cmd)) = self.tx.send(cmd) {
            tracing::debug!(?cmd, "queue stopped; command discarded");
        }
    }
}

/// A running toast queue.
///
/// Dropping the `ToastQueue` does not stop the actor while cloned handles are
/// alive; call [`shutdown`](Self::shutdown) for a deterministic stop.
pub struct ToastQueue {
    handle: QueueHandle,
    token: CancellationToken,
    actor: JoinHandle<()>,
    listener: Option<Listener>,
}

impl ToastQueue {
    /// Starts building a queue with `cfg`.
    pub fn builder(cfg: QueueConfig) -> ToastQueueBuilder {
        ToastQueueBuilder::new(cfg)
    }

    /// Validates `cfg` and starts a queue without subscribers.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(cfg: QueueConfig) -> Result<Self, QueueError> {
        ToastQueueBuilder::new(cfg).build()
    }

    /// Starts a queue with [`QueueConfig::default`].
    ///
    /// Must be called inside a tokio runtime.
    pub fn with_defaults() -> Self {
        ToastQueueBuilder::new(QueueConfig::default()).spawn()
    }

    pub(crate) fn from_parts(
        handle: QueueHandle,
        token: CancellationToken,
        actor: JoinHandle<()>,
        listener: Option<Listener>,
    ) -> Self {
        Self {
            handle,
            token,
            actor,
            listener,
        }
    }

    /// Returns a cloneable handle to this queue.
    pub fn handle(&self) -> QueueHandle {
        self.handle.clone()
    }

    pub fn add(&self, text: impl Into<Arc<str>>, icon: impl Into<Arc<str>>) -> ItemId {
        self.handle.add(text, icon)
    }

    pub fn add_item(&self, item: QueueItem) -> ItemId {
        self.handle.add_item(item)
    }

    pub fn pause(&self) {
        self.handle.pause();
    }

    pub fn resume(&self) {
        self.handle.resume();
    }

    pub fn dismiss(&self) {
        self.handle.dismiss();
    }

    pub fn current(&self) -> Option<QueueItem> {
        self.handle.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<Presentation> {
        self.handle.subscribe()
    }

    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.handle.events()
    }

    /// Stops the actor, then waits for subscribers to drain.
    ///
    /// Items still pending are discarded. Returns [`QueueError::ActorFailed`]
    /// if the actor task panicked.
    pub async fn shutdown(self) -> Result<(), QueueError> {
        self.token.cancel();
        let actor = self.actor.await;

        if let Some(listener) = self.listener {
            listener.stop().await;
        }

        actor.map_err(|e| QueueError::ActorFailed {
            reason: e.to_string(),
        })
    }
}
