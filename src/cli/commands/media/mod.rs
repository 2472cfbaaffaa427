//! Commands for inspecting the now-playing media session.

mod client;
mod info;
mod watch;

pub use client::ClientCommand;
pub use info::InfoCommand;
pub use watch::WatchCommand;

use crate::{cli::CliError, config::Config, service_manager::Services};

/// Start application services for a command invocation.
pub(crate) async fn start_services(config: &Config) -> Result<Services, CliError> {
    Services::new(config)
        .await
        .map_err(|e| CliError::ServiceError {
            service: "MediaSession".to_string(),
            details: e.to_string(),
        })
}
