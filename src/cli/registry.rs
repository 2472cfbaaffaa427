use std::{collections::HashMap, sync::Arc};

use crate::config::Config;

use super::{
    CliError, Command,
    commands::media::{ClientCommand, InfoCommand, WatchCommand},
    types::CommandMetadata,
};

/// Registry for CLI commands organized by category.
///
/// Commands are grouped by logical categories so the CLI stays navigable
/// as it grows, avoiding one giant match statement for dispatch.
pub struct CommandRegistry {
    /// Nested map: category name -> (command name -> command implementation)
    categories: HashMap<String, HashMap<String, Box<dyn Command>>>,
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    ///
    /// Commands must be added using `register_command`, typically during
    /// application initialization.
    pub fn new() -> Self {
        Self {
            categories: HashMap::new(),
        }
    }

    /// Registers a command in the specified category.
    ///
    /// The command's name (from its metadata) is used as the key within
    /// that category. A command with the same name replaces the previous
    /// registration.
    pub fn register_command(&mut self, category: &str, command: Box<dyn Command>) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(command.metadata().name, command);
    }

    /// Registers all built-in commands.
    pub(super) fn register_all_commands(&mut self, config: Arc<Config>) {
        self.register_command("media", Box::new(InfoCommand::new(Arc::clone(&config))));
        self.register_command("media", Box::new(WatchCommand::new(Arc::clone(&config))));
        self.register_command("media", Box::new(ClientCommand::new(config)));
    }

    /// Executes a command by name with the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CommandNotFound` if no registered command has
    /// the given name. Other errors may be returned by the command's
    /// execute method.
    pub async fn execute(&self, command_name: &str, args: &[String]) -> Result<String, CliError> {
        for commands in self.categories.values() {
            if let Some(command) = commands.get(command_name) {
                Self::validate_args(&command.metadata(), args)?;
                return command.execute(args).await;
            }
        }

        Err(CliError::CommandNotFound(format!(
            "Failed to find command '{command_name}'"
        )))
    }

    /// Lists all registered commands organized by category.
    ///
    /// Categories and commands are sorted alphabetically for consistent
    /// display.
    pub fn list_commands(&self) -> Vec<(String, Vec<CommandMetadata>)> {
        let mut categories: Vec<(String, Vec<CommandMetadata>)> = self
            .categories
            .iter()
            .map(|(category, commands)| {
                let mut metadata: Vec<CommandMetadata> =
                    commands.values().map(|command| command.metadata()).collect();
                metadata.sort_by(|a, b| a.name.cmp(&b.name));
                (category.clone(), metadata)
            })
            .collect();
        categories.sort_by(|a, b| a.0.cmp(&b.0));
        categories
    }

    fn validate_args(metadata: &CommandMetadata, args: &[String]) -> Result<(), CliError> {
        if args.is_empty() {
            Ok(())
        } else {
            Err(CliError::InvalidArguments(format!(
                "'{}' takes no arguments",
                metadata.name
            )))
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
