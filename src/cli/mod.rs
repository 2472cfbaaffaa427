//! Command-line interface for inspecting now-playing state.
//!
//! Provides a command system over the media session service. Commands
//! are organized by category and automatically generate help text from
//! metadata.

mod commands;
pub mod formatting;
mod registry;
mod service;
mod types;

pub use registry::CommandRegistry;
pub use service::CliService;
pub use types::{CliError, Command, CommandResult};
