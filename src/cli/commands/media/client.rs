use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    config::Config,
};

use super::start_services;

/// Command to show the application currently producing media
pub struct ClientCommand {
    config: Arc<Config>,
}

impl ClientCommand {
    /// Creates a new ClientCommand
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for ClientCommand {
    /// Show the application currently producing media
    ///
    /// # Errors
    ///
    /// Returns CliError if the media session service fails to start
    async fn execute(&self, _args: &[String]) -> CommandResult {
        let services = start_services(&self.config).await?;

        match services.media.client_id() {
            Some(client) => Ok(client),
            None => Ok("No media client active".to_string()),
        }
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "client".to_string(),
            description: "Show the application producing media".to_string(),
            category: "media".to_string(),
            examples: vec!["nowplay client".to_string()],
        }
    }
}
