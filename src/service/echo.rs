//! Echo service
//!
//! `EchoService` owns one `MessageStore` and one `Broadcaster` and exposes the
//! operations callers use: create, get, list, subscribe (plus unsubscribe and
//! a health check). It is constructed explicitly and shared as
//! `Arc<EchoService>`; there is no process-wide instance.
//!
//! Creating a message and broadcasting it are two sequential steps. The
//! message is stored before any subscriber sees it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::broker::{Broadcaster, Subscription, SubscriptionId};
use crate::config::BrokerSettings;
use crate::store::{EchoResult, Message, MessageStore};

/// Fixed liveness answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

impl Health {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct EchoService {
    store: MessageStore,
    broadcaster: Broadcaster,
}

impl EchoService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: &BrokerSettings) -> Self {
        Self {
            store: MessageStore::new(),
            broadcaster: Broadcaster::with_capacity(settings.subscriber_capacity),
        }
    }

    /// Store a new message and push it to every live subscriber.
    pub fn create_message(&self, text: impl Into<String>) -> EchoResult {
        let message = self.store.create(text);
        let delivered = self.broadcaster.broadcast(&message);
        debug!(
            "Message {} delivered to {delivered} of {} subscriber(s)",
            message.id,
            self.broadcaster.subscriber_count()
        );
        EchoResult::success(format!("Message {} created", message.id))
    }

    pub fn get_message(&self, id: &str) -> Option<Message> {
        self.store.get(id)
    }

    pub fn list_messages(&self) -> Vec<Message> {
        self.store.list()
    }

    /// Start receiving every message created from now on.
    pub fn subscribe_messages(&self) -> Subscription {
        self.broadcaster.subscribe()
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.broadcaster.unsubscribe(id)
    }

    pub fn health(&self) -> Health {
        Health::ok()
    }

    #[cfg(test)]
    pub(crate) fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }
}
