//! The `store` module holds every message created during the life of the
//! process and hands out their identifiers.

pub mod engine;
pub mod message;

pub use engine::MessageStore;
pub use message::{EchoResult, Message};

#[cfg(test)]
mod tests;
