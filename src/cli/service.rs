use std::sync::Arc;

use crate::config::Config;

use super::{CliError, CommandRegistry, formatting::format_header};

/// High-level service for managing and executing CLI commands.
///
/// Provides a unified interface for command registration, discovery, and
/// execution, plus generated help text from command metadata.
pub struct CliService {
    registry: CommandRegistry,
}

impl CliService {
    /// Creates a new CLI service with all available commands registered.
    ///
    /// # Arguments
    /// * `config` - Application configuration shared with commands that
    ///   construct services
    pub fn new(config: Arc<Config>) -> Self {
        let mut registry = CommandRegistry::new();
        registry.register_all_commands(config);

        CliService { registry }
    }

    /// Executes a command by name with the provided arguments.
    ///
    /// # Arguments
    /// * `command_name` - Name of the command to execute
    /// * `args` - Command-line arguments to pass to the command
    ///
    /// # Errors
    /// Returns `CliError::CommandNotFound` if the command doesn't exist.
    /// Other errors may be returned by the command itself.
    pub async fn execute_command(
        &self,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        self.registry.execute(command_name, args).await
    }

    /// Generates help text listing all commands with their descriptions.
    pub fn help(&self) -> String {
        let mut output = String::new();
        output.push_str(&format_header("nowplay - now playing media state"));
        output.push_str("\n\nUsage: nowplay <command>\n");

        for (category, commands) in self.registry.list_commands() {
            output.push_str(&format!("\n{} commands:\n", capitalize(&category)));
            for metadata in commands {
                output.push_str(&format!(
                    "  {:<8} {}\n",
                    metadata.name, metadata.description
                ));
            }
        }

        output.push_str("  help     Show this help\n");
        output
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
