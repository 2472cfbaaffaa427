use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::services::media_session::{self, MediaSessionService};

/// Container for all application services
///
/// Holds references to all initialized services that can be shared
/// across the application. Services are created once during startup
/// and then shared via Arc references.
pub struct Services {
    /// Media session service tracking now-playing state
    pub media: Arc<MediaSessionService>,
}

impl Services {
    /// Create all application services
    ///
    /// Initializes all required services using the provided configuration.
    /// Services are created with proper dependency injection from config.
    ///
    /// # Arguments
    /// * `config` - Application configuration for service settings
    ///
    /// # Errors
    /// Returns error if any service initialization fails
    pub async fn new(config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let media_service = MediaSessionService::start(media_session::Config {
            poll_interval: Duration::from_millis(config.media.poll_interval_ms),
            ignored_clients: config.media.ignored_clients.clone(),
            video_clients: config.media.video_clients.clone(),
        })
        .await?;

        Ok(Self {
            media: Arc::new(media_service),
        })
    }
}
