//! Client representation
//!
//! `Client` models one WebSocket connection. `sender` is the outbound side of
//! the bounded per-connection channel drained by the transport's writer task;
//! `subscriptions` lists the subscriptions opened over this connection.

use std::collections::HashSet;

use tokio::sync::mpsc::Sender;
use tungstenite::protocol::Message as WsMessage;
use uuid::Uuid;

use crate::broker::SubscriptionId;

#[derive(Debug)]
pub struct Client {
    pub id: String,
    pub sender: Sender<WsMessage>,
    pub subscriptions: HashSet<SubscriptionId>,
}

impl Client {
    /// Create a new client with a sender channel. The `id` is a UUID used in
    /// log output.
    pub fn new(sender: Sender<WsMessage>) -> Self {
        Self {
            id: format!("client-{}", Uuid::new_v4()),
            sender,
            subscriptions: HashSet::new(),
        }
    }

    pub fn track(&mut self, id: SubscriptionId) {
        self.subscriptions.insert(id);
    }

    /// Forget a subscription. Returns whether it belonged to this client.
    pub fn untrack(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.remove(&id)
    }

    /// Take every tracked subscription, leaving the set empty.
    pub fn drain_subscriptions(&mut self) -> Vec<SubscriptionId> {
        self.subscriptions.drain().collect()
    }
}
