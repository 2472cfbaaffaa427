//! Now-playing media session service.
//!
//! Tracks the system's current media playback state (elapsed time,
//! duration, play state, video flag, producing client) as one consistent
//! snapshot, sourced from MPRIS clients on the session bus, and notifies
//! watchers on every change.

/// Media client discovery and lifecycle
pub(crate) mod discovery;
/// Media session error types
pub mod error;
/// Session monitoring internals
pub(crate) mod monitoring;
/// D-Bus proxy trait definitions
pub mod proxy;
/// Media session service
pub mod service;
/// Snapshot state tracking
pub(crate) mod state;
/// Session types
pub mod types;

pub use error::*;
pub use service::*;
pub use types::*;
