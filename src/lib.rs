//! Nowplay - Reactive now-playing media state for the desktop.
//!
//! Nowplay maintains one authoritative, thread-safe snapshot of the
//! system's current media playback state, sourced from MPRIS clients on
//! the session bus. The main features include:
//!
//! - Consistent playback snapshots (elapsed, duration, play state, video
//!   flag, producing client) with no torn reads
//! - A change stream that notifies watchers once per state change
//! - CLI interface for inspecting and following playback state
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use nowplay::services::media_session::{Config, MediaSessionService};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let service = MediaSessionService::start(Config::default()).await?;
//!
//! let snapshot = service.snapshot();
//! println!("playing: {} ({:?})", snapshot.playing, snapshot.client);
//! # Ok(())
//! # }
//! ```

/// Core error types and result aliases.
pub mod core;

/// Configuration schema and loading.
pub mod config;

/// Command-line interface for inspecting playback state.
pub mod cli;

/// Reactive services for system integration.
pub mod services;

/// Simple service instance manager.
pub mod service_manager;

/// Tracing initialization for CLI and resident modes.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use self::core::{NowPlayError, Result};
