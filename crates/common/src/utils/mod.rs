/// Input/output utilities for file manipulation.
pub mod io;

/// Hex encoding and decoding.
pub mod strings;
