//! # Event bus for broadcasting supervisor events.
//!
//! [`Bus`] wraps [`tokio::sync::broadcast`] so that the reconnect loop and
//! every handler task can report progress without ever blocking on a slow
//! log sink.
//!
//! ## Architecture
//! ```text
//! Publishers (many):                    Subscriber (one):
//!   reconnect loop ──┐
//!   registry       ──┼──────► Bus ───► subscriber_listener ───► SubscriberSet
//!   handler task 1 ──┤  (broadcast chan)   (in Supervisor)
//!   handler task N ──┘
//! ```
//!
//! ## Rules
//! - `publish()` never blocks and never fails; with no receiver the event is dropped.
//! - A single ring buffer of `capacity` events is shared by all receivers.
//! - Receivers falling behind observe `RecvError::Lagged(n)` and skip `n` events.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for supervisor events.
///
/// Cheap to clone; every clone publishes into the same channel.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus; `capacity` is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all current receivers.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a receiver observing events sent from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn publish_without_receivers_is_a_noop() {
        let bus = Bus::new(0);
        bus.publish(Event::new(EventKind::Connecting));

        let mut rx = bus.subscribe();
        bus.publish(Event::new(EventKind::Connected).with_endpoint("amqp://u:p@h/"));
        let ev = rx.recv().await.expect("event");
        assert_eq!(ev.kind, EventKind::Connected);
        assert_eq!(ev.endpoint.as_deref(), Some("amqp://***@h/"));
    }
}
