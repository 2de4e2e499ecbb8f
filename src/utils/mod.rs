//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `echosub` application.
//!
//! This module centralizes reusable components such as the crate error type
//! and logging setup.

pub mod error;
pub mod logging;

#[cfg(test)]
mod tests;
