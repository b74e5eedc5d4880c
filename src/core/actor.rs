//! # QueueActor: the single execution context of a queue.
//!
//! Owns the [`Serializer`] and applies every state change on one tokio task,
//! which is what makes the at-most-one-visible invariant structural.
//!
//! ## Event loop
//! ```text
//! loop {
//!   select! (biased) {
//!     token.cancelled()        ─► exit
//!     rx.recv()                ─► Submit  → serializer.submit()
//!                                 Control → serializer.control()
//!     ticker.tick()            ─► serializer.tick()      (only while an item is visible)
//!     sleep_until(throttle)    ─► (wake up)              (only while something waits)
//!   }
//!   serializer.promote(now)    ─► re-anchor ticker on success
//! }
//! publish QueueStopped
//! ```
//!
//! ## Rules
//! - commands are drained before a tick is evaluated (`biased`), so a control
//!   signal sent between tick N and N+1 applies no later than tick N+1
//! - the ticker is created at promotion (first tick one period later) and
//!   dropped at retirement
//! - every [`Step`] is published on the [`Bus`]; slot steps also replace the
//!   [`Presentation`] snapshot

use std::time::Duration;

use tokio::{
    select,
    sync::{mpsc, watch},
    time::{self, Instant, Interval},
};
use tokio_util::sync::CancellationToken;

use crate::core::{
    active::Action,
    config::QueueConfig,
    serializer::{Serializer, Step},
};
use crate::events::{Bus, Event, EventKind};
use crate::items::{ItemId, Presentation, QueueItem, Transition};

/// Message from a handle to the actor.
#[derive(Debug)]
pub(crate) enum Command {
    /// Enqueue an item.
    Submit(QueueItem),
    /// Route an action to the bound sink; `target = None` means "whatever is visible".
    Control {
        action: Action,
        target: Option<ItemId>,
    },
}

pub(crate) struct QueueActor {
    tick_period: Duration,
    core: Serializer,
    bus: Bus,
    state: watch::Sender<Presentation>,
    ticker: Option<Interval>,
}

impl QueueActor {
    /// Creates an actor whose slot is free since `now`.
    pub fn new(
        cfg: &QueueConfig,
        bus: Bus,
        state: watch::Sender<Presentation>,
        now: Instant,
    ) -> Self {
        Self {
            tick_period: cfg.tick_period,
            core: Serializer::new(cfg, now),
            bus,
            state,
            ticker: None,
        }
    }

    /// Runs until `token` is cancelled or every command sender is dropped.
    pub async fn run(
        mut self,
        mut rx: mpsc::UnboundedReceiver<Command>,
        token: CancellationToken,
    ) {
        loop {
            let promotion_at = self.core.next_promotion_at();
            select! {
                biased;
                _ = token.cancelled() => break,
                cmd = rx.recv() => match cmd {
                    Some(cmd) => self.on_command(cmd),
                    None => break,
                },
                _ = next_tick(&mut self.ticker) => self.on_tick(),
                _ = wait_until(promotion_at) => {}
            }
            self.try_promote();
        }

        tracing::debug!(
            pending = self.core.pending(),
            receivers = self.bus.receiver_count(),
            "queue actor stopped"
        );
        self.bus
            .publish(Event::new(EventKind::QueueStopped).with_pending(self.core.pending()));
    }

    fn on_command(&mut self, cmd: Command) {
        match cmd {
            Command::Submit(item) => {
                for step in self.core.submit(item) {
                    self.apply(step);
                }
            }
            Command::Control { action, target } => match self.core.control(action, target) {
                Some(step) => self.apply(step),
                None => {
                    tracing::trace!(
                        action = action.as_label(),
                        target = target.map(|id| id.as_u64()),
                        phase = ?self.core.phase(),
                        "control ignored"
                    );
                }
            },
        }
    }

    fn on_tick(&mut self) {
        if let Some(step) = self.core.tick(Instant::now()) {
            self.apply(step);
        }
    }

    fn try_promote(&mut self) {
        let now = Instant::now();
        if let Some(step) = self.core.promote(now) {
            self.ticker = Some(time::interval_at(now + self.tick_period, self.tick_period));
            self.apply(step);
        }
    }

    /// Publishes `step` and mirrors slot changes into the presentation snapshot.
    fn apply(&mut self, step: Step) {
        let ev = match step {
            Step::Submitted { item, pending } => Event::new(EventKind::ItemSubmitted)
                .with_item(&item)
                .with_pending(pending),
            Step::Dropped { item } => {
                tracing::debug!(item = %item.id(), "pending item dropped on overflow");
                Event::new(EventKind::ItemDropped)
                    .with_item(&item)
                    .with_reason("overflow")
            }
            Step::Presented { item, pending } => {
                tracing::debug!(item = %item.id(), pending, "item presented");
                let ev = Event::new(EventKind::ItemPresented)
                    .with_item(&item)
                    .with_pending(pending);
                self.present(Some(item), Transition::Appear);
                ev
            }
            Step::Progressed { item } => {
                let ev = Event::new(EventKind::ItemProgressed)
                    .with_item_id(item.id())
                    .with_progress(item.progress());
                self.present(Some(item), Transition::Update);
                ev
            }
            Step::Controlled { item, action } => {
                self.present(self.core.current().cloned(), Transition::Update);
                Event::new(EventKind::ItemControlled)
                    .with_item_id(item)
                    .with_action(action)
            }
            Step::Retired { item, reason } => {
                tracing::debug!(item = %item.id(), reason = reason.as_label(), "item retired");
                self.ticker = None;
                self.present(None, Transition::Disappear);
                Event::new(EventKind::ItemRetired)
                    .with_item(&item)
                    .with_retire_reason(reason)
            }
        };
        self.bus.publish(ev);
    }

    fn present(&self, current: Option<QueueItem>, transition: Transition) {
        let next = self
            .state
            .borrow()
            .next(current, self.core.phase(), transition);
        self.state.send_replace(next);
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(t) => {
            t.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => time::sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}
