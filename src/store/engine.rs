//! Message store engine
//!
//! `MessageStore` is the authoritative record of every message created in
//! this process. It is safe to share between tasks: the counter and the map
//! live behind a single `RwLock`, so `create` is serialized against all
//! other access while `get` and `list` may run together.
//!
//! Ids are assigned from a counter starting at 1 and are never reused.
//! Messages are keyed by their numeric id in a `BTreeMap`, which makes
//! `list` return them in insertion order.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use parking_lot::RwLock;
use tracing::debug;

use crate::store::message::Message;

#[derive(Debug)]
struct StoreState {
    messages: BTreeMap<u64, Message>,
    next_id: u64,
}

#[derive(Debug)]
pub struct MessageStore {
    state: RwLock<StoreState>,
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                messages: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Store `text` under the next id and return the new record.
    pub fn create(&self, text: impl Into<String>) -> Message {
        let mut state = self.state.write();
        let id = state.next_id;
        state.next_id += 1;

        let message = Message {
            id: id.to_string(),
            text: text.into(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        state.messages.insert(id, message.clone());
        debug!("Stored message {id}");

        message
    }

    /// Look up a message by id. Ids that were never issued, or that are not
    /// decimal integers, are reported as `None`.
    pub fn get(&self, id: &str) -> Option<Message> {
        let key: u64 = id.parse().ok()?;
        // "01" parses to 1 but was never issued
        self.state
            .read()
            .messages
            .get(&key)
            .filter(|message| message.id == id)
            .cloned()
    }

    /// All stored messages in insertion order.
    pub fn list(&self) -> Vec<Message> {
        self.state.read().messages.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.state.read().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
