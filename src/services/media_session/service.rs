use std::time::Duration;

use futures::Stream;
use tokio::task::JoinHandle;
use tracing::{info, instrument};
use zbus::Connection;

use super::monitoring::SessionMonitoring;
use super::state::SnapshotState;
use super::types::PlaybackSnapshot;
use super::MediaSessionError;

/// Client patterns treated as video sources.
///
/// Matched case-insensitively against the application identifier; covers
/// the common browsers and video players that expose media sessions
/// without any track-level video hint.
pub const DEFAULT_VIDEO_CLIENTS: &[&str] = &[
    "chromium", "chrome", "firefox", "brave", "vlc", "mpv", "celluloid", "totem",
];

/// Configuration for the media session service
#[derive(Debug, Clone)]
pub struct Config {
    /// Elapsed-time poll interval while media is playing
    pub poll_interval: Duration,

    /// Client bus-name patterns to ignore during discovery
    pub ignored_clients: Vec<String>,

    /// Regex patterns marking a client as a video source
    pub video_clients: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            ignored_clients: Vec::new(),
            video_clients: DEFAULT_VIDEO_CLIENTS
                .iter()
                .copied()
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// Now-playing media session service.
///
/// Maintains one authoritative snapshot of current playback state, sourced
/// from media clients on the session bus, and notifies watchers on every
/// change. Construct explicitly with [`MediaSessionService::start`] and
/// share via `Arc`; background tasks are stopped when the service drops.
pub struct MediaSessionService {
    state: SnapshotState,
    tasks: Vec<JoinHandle<()>>,
}

impl MediaSessionService {
    /// Start the media session service with the given configuration.
    ///
    /// Connects to the session bus, registers any media clients already
    /// present, and begins monitoring for changes. The returned service
    /// already reflects a session that was active at startup.
    ///
    /// # Errors
    ///
    /// Returns `MediaSessionError::InitializationFailed` if the D-Bus
    /// connection or discovery setup fails
    #[instrument(skip(config))]
    pub async fn start(config: Config) -> Result<Self, MediaSessionError> {
        info!("Starting media session service");

        let connection = Connection::session().await.map_err(|e| {
            MediaSessionError::InitializationFailed(format!("D-Bus connection failed: {e}"))
        })?;

        let state = SnapshotState::new();
        let tasks = SessionMonitoring::start(&connection, state.clone(), config).await?;

        Ok(Self { state, tasks })
    }

    /// Get the current playback snapshot.
    ///
    /// The returned group is internally consistent: all fields come from a
    /// single source event. Safe to call from any thread; never blocks.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.state.property().get()
    }

    /// Seconds since track start.
    pub fn elapsed_time(&self) -> f64 {
        self.snapshot().elapsed
    }

    /// Total track length in seconds; 0 when unknown.
    pub fn duration(&self) -> f64 {
        self.snapshot().duration
    }

    /// Whether media is actively advancing.
    pub fn is_playing(&self) -> bool {
        self.snapshot().playing
    }

    /// Whether the current media is video rather than audio-only.
    pub fn is_video(&self) -> bool {
        self.snapshot().video
    }

    /// Identifier of the application currently producing media.
    ///
    /// Returns `None` when no media session exists.
    pub fn client_id(&self) -> Option<String> {
        self.snapshot().client
    }

    /// Watch for playback state changes.
    ///
    /// The stream yields the current snapshot immediately, then one item
    /// per update that changed at least one field. Observers may use the
    /// yielded value directly or re-read the accessors.
    pub fn watch(&self) -> impl Stream<Item = PlaybackSnapshot> + Send {
        self.state.property().watch()
    }
}

impl Drop for MediaSessionService {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use futures::StreamExt;

    use super::*;
    use crate::services::media_session::types::SessionUpdate;

    fn detached() -> MediaSessionService {
        MediaSessionService {
            state: SnapshotState::new(),
            tasks: Vec::new(),
        }
    }

    #[test]
    fn accessors_are_empty_before_any_session_event() {
        let service = detached();

        assert_eq!(service.elapsed_time(), 0.0);
        assert_eq!(service.duration(), 0.0);
        assert!(!service.is_playing());
        assert!(!service.is_video());
        assert!(service.client_id().is_none());
    }

    #[test]
    fn accessors_reflect_one_coherent_event() {
        let service = detached();

        service.state.apply(SessionUpdate::Refresh(PlaybackSnapshot {
            elapsed: 30.0,
            duration: 95.0,
            playing: true,
            video: true,
            client: Some("firefox".to_string()),
        }));

        let snapshot = service.snapshot();
        assert_eq!(snapshot.elapsed, 30.0);
        assert_eq!(snapshot.duration, 95.0);
        assert!(snapshot.playing);
        assert!(snapshot.video);
        assert_eq!(snapshot.client.as_deref(), Some("firefox"));
    }

    #[tokio::test]
    async fn watch_yields_current_then_changes() {
        let service = detached();
        let mut stream = Box::pin(service.watch());

        assert_eq!(stream.next().await.unwrap(), PlaybackSnapshot::default());

        let updated = PlaybackSnapshot {
            elapsed: 1.0,
            duration: 2.0,
            playing: true,
            video: false,
            client: Some("spotify".to_string()),
        };
        service
            .state
            .apply(SessionUpdate::Refresh(updated.clone()));

        assert_eq!(stream.next().await.unwrap(), updated);
    }

    #[test]
    fn default_config_polls_every_second() {
        let config = Config::default();
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert!(config.ignored_clients.is_empty());
        assert!(!config.video_clients.is_empty());
    }
}
