use serde::{Deserialize, Serialize};

use crate::services::media_session::DEFAULT_VIDEO_CLIENTS;

/// Media session service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Elapsed-time poll interval in milliseconds while media is playing
    pub poll_interval_ms: u64,

    /// List of client bus-name patterns to ignore during discovery
    pub ignored_clients: Vec<String>,

    /// Regex patterns marking a client as a video source
    pub video_clients: Vec<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            ignored_clients: Vec::new(),
            video_clients: DEFAULT_VIDEO_CLIENTS
                .iter()
                .copied()
                .map(str::to_owned)
                .collect(),
        }
    }
}
