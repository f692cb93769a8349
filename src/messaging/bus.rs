use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
/// Event bus for match game notifications
///
/// Broadcasts every `GameEvent` to all subscribers. Subscribers whose
/// receiver has been dropped are pruned on the next publish.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::events::GameEvent;

/// Subscriber ID for tracking subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

struct Subscriber {
    id: SubscriberId,
    sender: Sender<GameEvent>,
}

/// Event bus shared between a game and its renderers
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<RwLock<Vec<Subscriber>>>,
    next_id: Arc<AtomicUsize>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events, returns a receiver and subscription ID
    pub fn subscribe(&self) -> (Receiver<GameEvent>, SubscriberId) {
        let (tx, rx) = unbounded();
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));

        self.subscribers.write().push(Subscriber { id, sender: tx });
        (rx, id)
    }

    pub fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers.write().retain(|s| s.id != id);
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: GameEvent) {
        tracing::trace!("Game event: {}", event.description());

        let closed: Vec<SubscriberId> = self
            .subscribers
            .read()
            .iter()
            // Unbounded channels only fail once the receiver is gone
            .filter(|s| s.sender.try_send(event.clone()).is_err())
            .map(|s| s.id)
            .collect();

        if !closed.is_empty() {
            self.subscribers.write().retain(|s| !closed.contains(&s.id));
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    pub fn clear(&self) {
        self.subscribers.write().clear();
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
