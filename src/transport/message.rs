//! JSON frames exchanged over the WebSocket, tagged by `type`.

use serde::{Deserialize, Serialize};

use crate::broker::SubscriptionId;
use crate::store::{EchoResult, Message};

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    CreateMessage { text: String },
    GetMessage { id: String },
    ListMessages,
    SubscribeMessages,
    Unsubscribe { subscription_id: SubscriptionId },
    Health,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    EchoResult(EchoResult),
    Message {
        message: Option<Message>,
    },
    Messages {
        messages: Vec<Message>,
    },
    Subscribed {
        subscription_id: SubscriptionId,
    },
    Event {
        subscription_id: SubscriptionId,
        message: Message,
    },
    /// The subscription's stream has ended; no further events follow.
    Complete {
        subscription_id: SubscriptionId,
    },
    Unsubscribed {
        subscription_id: SubscriptionId,
        removed: bool,
    },
    Health {
        status: String,
    },
    Error {
        message: String,
    },
}
