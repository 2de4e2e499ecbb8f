//! Subscription handles
//!
//! A `Subscription` is the receiving half of one subscriber's bounded
//! delivery channel plus the id the broadcaster registered it under. The
//! broadcaster keeps the only sender, so removing the registration closes the
//! channel: anything already buffered can still be read, after which `recv`
//! returns `None`.
//!
//! `Subscription` is also a `Stream` of messages. The stream cannot be
//! restarted once it has ended.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::Receiver;

use crate::store::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Receiving side of one registration.
///
/// Dropping a `Subscription` does not unregister it: the broadcaster only
/// notices the closed channel on its next `subscribe` or `broadcast` and
/// prunes it then. Call `Broadcaster::unsubscribe` to release it at once.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    receiver: Receiver<Message>,
}

impl Subscription {
    pub(crate) fn new(id: SubscriptionId, receiver: Receiver<Message>) -> Self {
        Self { id, receiver }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Wait for the next delivered message. Returns `None` once the
    /// subscription has been removed and its buffer drained.
    pub async fn recv(&mut self) -> Option<Message> {
        self.receiver.recv().await
    }

    /// Take a buffered message without waiting.
    pub fn try_recv(&mut self) -> Option<Message> {
        self.receiver.try_recv().ok()
    }
}

impl Stream for Subscription {
    type Item = Message;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}
