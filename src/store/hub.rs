//! Snapshot fan-out for live subscriptions.
//!
//! Every publish delivers the *whole* collection; subscribers never merge
//! increments, they replace what they hold with the newest snapshot.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Mutex;

pub struct SnapshotHub<T> {
    senders: Mutex<Vec<Sender<Vec<T>>>>,
}

impl<T: Clone> Default for SnapshotHub<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> SnapshotHub<T> {
    pub fn new() -> Self {
        Self {
            senders: Mutex::new(Vec::new()),
        }
    }

    /// Register a subscriber and hand it `initial` as its first snapshot.
    pub fn subscribe(&self, initial: Vec<T>) -> Subscription<T> {
        let (tx, rx) = mpsc::channel();
        // the receiver is alive, this cannot fail
        let _ = tx.send(initial);
        self.senders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(tx);
        Subscription {
            rx,
            current: Vec::new(),
            closed: false,
        }
    }

    /// Push a fresh snapshot to every live subscriber, pruning dropped ones.
    pub fn publish(&self, snapshot: &[T]) {
        let mut senders = self
            .senders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        senders.retain(|tx| tx.send(snapshot.to_vec()).is_ok());
    }

    /// Whether a write needs to build a snapshot at all.
    pub fn has_subscribers(&self) -> bool {
        !self
            .senders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_empty()
    }
}

/// Receiving end of a live subscription. Dropping it unsubscribes.
pub struct Subscription<T> {
    rx: Receiver<Vec<T>>,
    current: Vec<T>,
    closed: bool,
}

impl<T> Subscription<T> {
    /// Drain pending snapshots and return the most recent one.
    pub fn latest(&mut self) -> &[T] {
        loop {
            match self.rx.try_recv() {
                Ok(snapshot) => self.current = snapshot,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.closed = true;
                    break;
                }
            }
        }
        &self.current
    }

    /// Next undelivered snapshot, if any, without skipping intermediate ones.
    pub fn try_next(&mut self) -> Option<Vec<T>>
    where
        T: Clone,
    {
        match self.rx.try_recv() {
            Ok(snapshot) => {
                self.current = snapshot.clone();
                Some(snapshot)
            }
            Err(TryRecvError::Disconnected) => {
                self.closed = true;
                None
            }
            Err(TryRecvError::Empty) => None,
        }
    }

    /// True once the publishing store has gone away.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscriber_receives_initial_snapshot() {
        let hub = SnapshotHub::new();
        let mut sub = hub.subscribe(vec![1, 2]);
        assert_eq!(sub.latest(), &[1, 2]);
    }

    #[test]
    fn latest_replaces_wholesale() {
        let hub = SnapshotHub::new();
        let mut sub = hub.subscribe(vec![1]);
        hub.publish(&[1, 2]);
        hub.publish(&[3]);
        assert_eq!(sub.latest(), &[3]);
        // nothing new: keep what we have
        assert_eq!(sub.latest(), &[3]);
    }

    #[test]
    fn try_next_walks_every_snapshot() {
        let hub = SnapshotHub::new();
        let mut sub = hub.subscribe(vec![]);
        hub.publish(&[7]);
        assert_eq!(sub.try_next(), Some(vec![]));
        assert_eq!(sub.try_next(), Some(vec![7]));
        assert_eq!(sub.try_next(), None);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let hub = SnapshotHub::new();
        let sub = hub.subscribe(vec![0u8]);
        assert!(hub.has_subscribers());
        drop(sub);
        hub.publish(&[1]);
        assert!(!hub.has_subscribers());
    }

    #[test]
    fn dropping_the_hub_closes_subscriptions() {
        let hub = SnapshotHub::new();
        let mut sub = hub.subscribe(vec![1u8]);
        drop(hub);
        assert_eq!(sub.latest(), &[1]);
        assert!(sub.is_closed());
    }
}
