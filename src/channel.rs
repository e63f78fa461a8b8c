//! Publish/subscribe primitives built on `async_channel`.
//!
//! - [`Broadcast`] fans each published value out to every live subscriber.
//!   Nothing is replayed: a subscriber only sees values published after it
//!   subscribed.
//! - [`LatestValue`] caches the most recent value; a new subscriber
//!   immediately receives it, followed by every later update.
//!
//! Subscribers get unbounded `async_channel::Receiver`s, so publishing never
//! blocks. Receivers that have been dropped are pruned on the next publish.

use async_channel::{Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use tracing::trace;

/// Fire-and-forget fan-out with no replay.
pub struct Broadcast<T: Clone> {
    name: &'static str,
    subscribers: Mutex<Vec<Sender<T>>>,
}

impl<T: Clone> Broadcast<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> Receiver<T> {
        let (tx, rx) = async_channel::unbounded();
        self.subscribers.lock().push(tx);
        rx
    }

    /// Deliver `value` to every subscriber; returns how many received it.
    pub fn publish(&self, value: T) -> usize {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| tx.try_send(value.clone()).is_ok());
        trace!(stream = self.name, receivers = subscribers.len(), "Published");
        subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|tx| !tx.is_closed());
        subscribers.len()
    }
}

/// Last-value cache: subscribers start from the current value.
pub struct LatestValue<T: Clone> {
    value: RwLock<T>,
    updates: Broadcast<T>,
}

impl<T: Clone> LatestValue<T> {
    pub fn new(name: &'static str, initial: T) -> Self {
        Self {
            value: RwLock::new(initial),
            updates: Broadcast::new(name),
        }
    }

    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    pub fn set(&self, value: T) {
        let mut current = self.value.write();
        *current = value.clone();
        self.updates.publish(value);
    }

    /// The returned receiver already holds the current value.
    pub fn subscribe(&self) -> Receiver<T> {
        // Read lock excludes a concurrent `set` between snapshot and registration
        let current = self.value.read();
        let (tx, rx) = async_channel::unbounded();
        let _ = tx.try_send(current.clone());
        self.updates.subscribers.lock().push(tx);
        rx
    }
}

/// Drain every pending value from `rx`, keeping only the newest.
pub fn drain_latest<T>(rx: &Receiver<T>) -> Option<T> {
    let mut latest = None;
    while let Ok(value) = rx.try_recv() {
        latest = Some(value);
    }
    latest
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_channel::TryRecvError;

    #[test]
    fn broadcast_reaches_every_subscriber() {
        let stream = Broadcast::new("test");
        let a = stream.subscribe();
        let b = stream.subscribe();

        assert_eq!(stream.publish("x".to_string()), 2);
        assert_eq!(a.try_recv().unwrap(), "x");
        assert_eq!(b.try_recv().unwrap(), "x");
    }

    #[test]
    fn broadcast_does_not_replay() {
        let stream = Broadcast::new("test");
        stream.publish(1);
        let late = stream.subscribe();
        assert!(matches!(late.try_recv(), Err(TryRecvError::Empty)));
        stream.publish(2);
        assert_eq!(late.try_recv().unwrap(), 2);
    }

    #[test]
    fn broadcast_prunes_dropped_subscribers() {
        let stream = Broadcast::new("test");
        let kept = stream.subscribe();
        drop(stream.subscribe());
        assert_eq!(stream.publish(7), 1);
        assert_eq!(stream.subscriber_count(), 1);
        assert_eq!(kept.try_recv().unwrap(), 7);
    }

    #[test]
    fn broadcast_without_subscribers_is_fine() {
        let stream: Broadcast<u8> = Broadcast::new("test");
        assert_eq!(stream.publish(1), 0);
    }

    #[test]
    fn latest_value_replays_current_to_new_subscriber() {
        let flag = LatestValue::new("flag", true);
        flag.set(false);
        let rx = flag.subscribe();
        assert!(!rx.try_recv().unwrap());
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn latest_value_pushes_updates() {
        let flag = LatestValue::new("flag", true);
        let rx = flag.subscribe();
        flag.set(false);
        flag.set(true);
        assert_eq!(drain_latest(&rx), Some(true));
        assert_eq!(drain_latest(&rx), None);
        assert!(flag.get());
    }
}
