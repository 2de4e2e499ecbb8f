//! The `service` module assembles the message store and the broadcaster into
//! the context object every transport works against.

pub mod echo;

pub use echo::{EchoService, Health};

#[cfg(test)]
mod tests;
