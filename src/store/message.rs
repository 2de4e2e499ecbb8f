//! Message definitions
//!
//! `Message` is the record kept by the store and pushed to subscribers.
//! Fields:
//! - `id`: decimal rendering of a per-process counter starting at 1
//! - `text`: producer-supplied content, stored verbatim
//! - `created_at`: RFC 3339 UTC timestamp assigned by the store on write,
//!   serialized as `createdAt`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Outcome of a request/response operation. Exactly one of `message` or
/// `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EchoResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn failure(error: impl Into<String>) -> Self {
        Self {
            message: None,
            error: Some(error.into()),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_success(&self) -> bool {
        self.message.is_some()
    }
}
