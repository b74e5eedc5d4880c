use std::sync::Arc;

use tokio::sync::{broadcast::error::RecvError, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::core::{
    actor::QueueActor,
    config::QueueConfig,
    handle::{QueueHandle, ToastQueue},
};
use crate::error::QueueError;
use crate::events::{Bus, EventKind};
use crate::items::Presentation;
use crate::subscribers::{Subscribe, SubscriberSet};

/// Builder for constructing a [`ToastQueue`] with optional subscribers.
pub struct ToastQueueBuilder {
    cfg: QueueConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl ToastQueueBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: QueueConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive queue events through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Adds one subscriber.
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Validates the configuration and starts the queue.
    ///
    /// This consumes the builder and initializes all runtime components:
    /// - Event bus for broadcasting
    /// - Subscriber workers and their listener (if any subscriber was set)
    /// - The queue actor
    ///
    /// Must be called inside a tokio runtime.
    pub fn build(self) -> Result<ToastQueue, QueueError> {
        self.cfg.validate()?;
        Ok(self.spawn())
    }

    pub(crate) fn spawn(self) -> ToastQueue {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let token = CancellationToken::new();
        let (state_tx, state_rx) = watch::channel(Presentation::idle());
        let (tx, rx) = mpsc::unbounded_channel();

        let listener = if self.subscribers.is_empty() {
            None
        } else {
            let subs = SubscriberSet::new(self.subscribers, bus.clone());
            tracing::debug!(subscribers = subs.len(), "subscriber listener started");
            Some(Listener::spawn(&bus, subs))
        };

        let actor = QueueActor::new(&self.cfg, bus.clone(), state_tx, Instant::now());
        let actor = tokio::spawn(actor.run(rx, token.clone()));
        tracing::debug!(
            capacity = self.cfg.capacity,
            appear_delay_ms = self.cfg.appear_delay.as_millis() as u64,
            ticks_to_expire = self.cfg.ticks_to_expire(),
            tick_ms = self.cfg.tick_period.as_millis() as u64,
            "toast queue started"
        );

        ToastQueue::from_parts(QueueHandle::new(tx, state_rx, bus), token, actor, listener)
    }
}

/// Task forwarding bus events into a [`SubscriberSet`].
///
/// Exits after forwarding `QueueStopped`, so a queue dropped without
/// `shutdown` still releases its subscribers. Its own token is cancelled only
/// after the actor has exited; buffered events win over cancellation, so the
/// final `QueueStopped` is always delivered.
pub(crate) struct Listener {
    task: JoinHandle<()>,
    token: CancellationToken,
}

impl Listener {
    fn spawn(bus: &Bus, subs: SubscriberSet) -> Self {
        let mut rx = bus.subscribe();
        let token = CancellationToken::new();
        let stop = token.clone();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    ev = rx.recv() => match ev {
                        Ok(ev) => {
                            subs.emit(&ev);
                            if ev.kind == EventKind::QueueStopped {
                                break;
                            }
                        }
                        Err(RecvError::Lagged(n)) => {
                            tracing::warn!(skipped = n, "subscriber listener lagged");
                        }
                        Err(RecvError::Closed) => break,
                    },
                    _ = stop.cancelled() => break,
                }
            }
            subs.shutdown().await;
        });
        Self { task, token }
    }

    /// Delivers what is buffered, then waits for every subscriber to drain.
    pub(crate) async fn stop(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "subscriber listener failed");
        }
    }
}
