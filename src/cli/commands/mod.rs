//! Built-in CLI command implementations.

pub mod media;
