//! The `transport` module is responsible for handling network communication
//! with clients via WebSockets.
//!
//! It defines the JSON frames exchanged with clients and implements the
//! WebSocket server, which decodes requests and forwards them to the
//! `EchoService`, plus the plain HTTP health check served on the same port.

pub mod health;
pub mod message;
pub mod websocket;
