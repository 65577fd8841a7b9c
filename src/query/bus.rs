//! Invalidation bus
//!
//! Mutations publish the cache keys they touched; every subscriber gets its
//! own copy of each event and drains it when convenient. Publishing never
//! calls back into subscribers, so there is no re-entrancy.

use super::QueryKey;

/// A queue for events of a single type.
/// Events are collected as they happen and drained by the owner.
#[derive(Debug, Clone)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle identifying one subscriber's queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(usize);

/// Fan-out of invalidation events to per-subscriber queues
#[derive(Debug, Default)]
pub struct InvalidationBus {
    subscribers: Vec<EventQueue<QueryKey>>,
}

impl InvalidationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber; it sees only events published afterwards
    pub fn subscribe(&mut self) -> Subscription {
        self.subscribers.push(EventQueue::new());
        Subscription(self.subscribers.len() - 1)
    }

    pub fn publish(&mut self, key: QueryKey) {
        log::debug!("invalidate {}", key.path());
        for queue in &mut self.subscribers {
            queue.send(key);
        }
    }

    /// Take every event queued for `sub`, oldest first
    pub fn drain(&mut self, sub: Subscription) -> Vec<QueryKey> {
        self.subscribers
            .get_mut(sub.0)
            .map(|queue| queue.drain().collect())
            .unwrap_or_default()
    }

    /// Whether `sub` has undrained events
    pub fn has_pending(&self, sub: Subscription) -> bool {
        self.subscribers.get(sub.0).is_some_and(|queue| !queue.is_empty())
    }
}
