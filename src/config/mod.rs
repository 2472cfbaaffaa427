//! Configuration schema and loading.

mod loading;
mod media;
mod paths;

pub use media::MediaConfig;
pub use paths::ConfigPaths;

use serde::{Deserialize, Serialize};

/// Main configuration structure for nowplay.
///
/// Contains all configuration settings, with serde defaults so a missing
/// or partial file degrades to the built-in configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Media session settings.
    #[serde(default)]
    pub media: MediaConfig,
}
