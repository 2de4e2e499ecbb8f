//! The `client` module defines the representation of a connected client.
//!
//! It provides the `Client` struct, which holds a connection's id, the
//! channel used to push frames to it, and the subscriptions it has opened so
//! they can be closed when the connection goes away.

pub mod pubsub_client;
pub use pubsub_client::Client;
