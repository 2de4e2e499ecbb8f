//! Broadcaster engine
//!
//! The broadcaster owns the list of active subscriber channels and fans each
//! newly created message out to them.
//!
//! Concurrency and delivery notes:
//! - `subscribe` and `unsubscribe` take the write lock; `broadcast` holds the
//!   read lock for the whole fan-out, so several broadcasts may run at once
//!   but never interleave with a change to the subscriber list.
//! - Each delivery is a single `try_send`. A subscriber whose buffer is full
//!   misses that message; nothing is retried and the producer is never held
//!   up. Delivery is at-most-once and best-effort.
//! - Registrations whose receiver was dropped without unsubscribing are
//!   pruned by the next `subscribe` or `broadcast`.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tokio::sync::mpsc::{self, Sender, error::TrySendError};
use tracing::{debug, info};

use crate::broker::subscription::{Subscription, SubscriptionId};
use crate::store::Message;

#[derive(Debug)]
struct Subscriber {
    id: SubscriptionId,
    sender: Sender<Message>,
}

#[derive(Debug)]
pub struct Broadcaster {
    subscribers: RwLock<Vec<Subscriber>>,
    next_id: AtomicU64,
    capacity: usize,
}

impl Broadcaster {
    /// Buffer size of each subscriber channel when none is configured.
    pub const DEFAULT_CAPACITY: usize = 1;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a broadcaster whose subscriber channels buffer `capacity`
    /// undelivered messages. A capacity of 0 is raised to 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Register a new delivery channel.
    pub fn subscribe(&self) -> Subscription {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (sender, receiver) = mpsc::channel(self.capacity);

        {
            let mut subscribers = self.subscribers.write();
            // receivers dropped without unsubscribing
            subscribers.retain(|s| !s.sender.is_closed());
            subscribers.push(Subscriber { id, sender });
        }
        info!("Registered subscription {id}");

        Subscription::new(id, receiver)
    }

    /// Remove a registration and close its channel. Returns whether `id` was
    /// registered; unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = {
            let mut subscribers = self.subscribers.write();
            subscribers
                .iter()
                .position(|s| s.id == id)
                .map(|idx| subscribers.remove(idx))
        };

        match removed {
            // dropping the only sender closes the channel
            Some(subscriber) => {
                drop(subscriber);
                info!("Removed subscription {id}");
                true
            }
            None => {
                debug!("Unsubscribe for unknown subscription {id} ignored");
                false
            }
        }
    }

    /// Offer `message` to every registered subscriber without waiting.
    /// Returns how many subscribers accepted it.
    pub fn broadcast(&self, message: &Message) -> usize {
        let mut delivered = 0;
        let mut closed = Vec::new();

        {
            let subscribers = self.subscribers.read();
            for subscriber in subscribers.iter() {
                match subscriber.sender.try_send(message.clone()) {
                    Ok(()) => delivered += 1,
                    Err(TrySendError::Full(_)) => {
                        debug!(
                            "Subscription {} is full, dropping message {}",
                            subscriber.id, message.id
                        );
                    }
                    Err(TrySendError::Closed(_)) => closed.push(subscriber.id),
                }
            }
        }

        if !closed.is_empty() {
            let mut subscribers = self.subscribers.write();
            subscribers.retain(|s| !closed.contains(&s.id));
            debug!("Pruned {} closed subscription(s)", closed.len());
        }

        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}
