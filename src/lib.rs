//! # EchoSub
//!
//! `echosub` is an in-memory message store with a live publish/subscribe
//! feed. Every message created is kept for the life of the process and
//! pushed to all current subscribers without ever waiting on a slow one.
//!
//! ## Core Modules
//!
//! - `store`: holds messages and assigns their ids.
//! - `broker`: tracks subscribers and fans new messages out to them.
//! - `service`: the context object tying the store and broker together.
//! - `client`: represents a connected WebSocket client.
//! - `config`: handles loading and managing server configuration.
//! - `transport`: the WebSocket server and its JSON frames.
//! - `utils`: error type and logging setup.

pub mod broker;
pub mod client;
pub mod config;
pub mod service;
pub mod store;
pub mod transport;
pub mod utils;
