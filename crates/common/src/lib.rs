//! Common utilities used across the evmi crates.
//!
//! This crate provides hex encoding and decoding, file helpers, and the loader that turns a
//! command-line target into bytecode.

/// Loading bytecode from files or inline hex.
pub mod bytecode;

/// Error types for the common crate.
pub mod error;

/// General utility functions for common tasks.
pub mod utils;

pub use error::Error;
