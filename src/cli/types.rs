use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
///
/// Each variant provides contextual information to help users understand
/// what went wrong.
#[derive(Error, Debug)]
pub enum CliError {
    /// A command was not found in the registry.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Invalid arguments were provided to a command.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A service failed while executing the command.
    #[error("{service} service error: {details}")]
    ServiceError {
        /// Name of the failing service
        service: String,
        /// Underlying error details
        details: String,
    },
}

/// Type alias for command execution results.
///
/// All CLI commands return this type, providing either a success message
/// as a String or a CliError describing what went wrong.
pub type CommandResult = Result<String, CliError>;

/// Complete metadata for a CLI command.
///
/// Serves as the single source of truth for a command's identity and
/// usage; the CLI system uses it for help generation and command
/// discovery.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// The command name users type.
    pub name: String,

    /// Human-readable description of what the command does.
    pub description: String,

    /// Category the command belongs to.
    pub category: String,

    /// Usage examples shown in help output.
    pub examples: Vec<String>,
}

/// A CLI command implementation.
///
/// Commands are registered with the [`crate::cli::CommandRegistry`] and
/// executed by name. Each command is responsible for its own business
/// logic; basic argument validation happens in the registry.
#[async_trait]
pub trait Command: Send + Sync {
    /// Executes the command with the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns `CliError` for any execution failure, including invalid
    /// argument values and service unavailability.
    async fn execute(&self, args: &[String]) -> CommandResult;

    /// Returns the command's metadata.
    fn metadata(&self) -> CommandMetadata;
}
