//! # Event bus for broadcasting queue events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`]. The queue actor is
//! the main publisher; subscriber workers publish overflow/panic reports.
//!
//! ## Architecture
//! ```text
//! Publishers:                         Consumers:
//!   QueueActor ──────┐          ┌──► subscriber listener ──► SubscriberSet
//!                    ├──► Bus ──┤
//!   SubscriberSet ───┘          └──► QueueHandle::events() (raw receivers)
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks the actor.
//! - **Bounded capacity**: one ring buffer of [`QueueConfig::bus_capacity`](crate::QueueConfig::bus_capacity) events.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip `n` oldest items.
//! - **No persistence**: events are lost if nobody is subscribed at send time.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for queue events.
///
/// Cheap to clone (internally holds an `Arc`-backed sender).
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all active receivers; dropped if there are none.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that observes events sent after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    /// Number of live receivers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn test_publish_reaches_every_receiver() {
        let bus = Bus::new(8);
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();
        assert_eq!(bus.receiver_count(), 2);

        bus.publish(Event::new(EventKind::ItemSubmitted));
        assert_eq!(a.recv().await.map(|e| e.kind).ok(), Some(EventKind::ItemSubmitted));
        assert_eq!(b.recv().await.map(|e| e.kind).ok(), Some(EventKind::ItemSubmitted));
    }

    #[test]
    fn test_publish_without_receivers_is_silent() {
        let bus = Bus::new(0);
        bus.publish(Event::new(EventKind::QueueStopped));
        assert_eq!(bus.receiver_count(), 0);
    }
}
