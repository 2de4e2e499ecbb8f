//! Error types for the outer surfaces of `echosub`.
//!
//! The message store and broadcaster never fail: a missing message is `None`,
//! a full subscriber buffer is a silent drop, and an unknown unsubscribe is a
//! no-op. Errors only come from configuration loading and the network
//! transport.

use thiserror::Error;

/// Main error type for server and client operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
