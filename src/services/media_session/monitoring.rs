use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use regex::RegexBuilder;
use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use zbus::Connection;

use super::discovery::ClientDiscovery;
use super::proxy::MediaPlayer2PlayerProxy;
use super::service::Config;
use super::state::SnapshotState;
use super::types::{
    ClientId, PlaybackSnapshot, PlaybackState, SessionUpdate, TrackInfo, secs_from_micros,
};
use crate::services::media_session::MediaSessionError;

/// URL suffixes that mark a track as video regardless of the client
const VIDEO_URL_SUFFIXES: &[&str] = &[".mp4", ".mkv", ".webm", ".avi", ".mov"];

/// A discovered media client and its monitoring resources
pub(crate) struct ClientHandle {
    /// Player interface proxy for this client
    pub(crate) player: MediaPlayer2PlayerProxy<'static>,

    /// Application identifier published in snapshots
    pub(crate) app_id: String,

    /// Property-watch task; aborted when the client vanishes
    pub(crate) watch_task: JoinHandle<()>,
}

/// Thread-safe collection of discovered media clients.
///
/// Shared between the discovery layer (which inserts and removes entries)
/// and the session loop (which reads proxies for refresh and polling).
pub(crate) type ClientMap = Arc<RwLock<HashMap<ClientId, ClientHandle>>>;

/// Signals forwarded from per-client watchers into the session loop
#[derive(Debug)]
pub(crate) enum ClientSignal {
    /// A client appeared on the bus
    Added(ClientId),

    /// A client vanished from the bus
    Removed(ClientId),

    /// The client's playback status changed
    Status {
        /// Originating client
        id: ClientId,
        /// New playback state
        state: PlaybackState,
    },

    /// The client's track metadata changed
    Metadata {
        /// Originating client
        id: ClientId,
        /// Parsed metadata subset
        track: TrackInfo,
    },
}

/// Watches one client's properties and forwards change signals
pub(crate) struct ClientMonitoring;

impl ClientMonitoring {
    /// Spawn the property-watch task for a client.
    pub(crate) fn spawn(
        id: ClientId,
        player: MediaPlayer2PlayerProxy<'static>,
        signals_tx: mpsc::UnboundedSender<ClientSignal>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut status_changes = player.receive_playback_status_changed().await;
            let mut metadata_changes = player.receive_metadata_changed().await;

            loop {
                tokio::select! {
                    signal = status_changes.next() => {
                        match signal {
                            Some(signal) => {
                                if let Ok(status) = signal.get().await {
                                    let _ = signals_tx.send(ClientSignal::Status {
                                        id: id.clone(),
                                        state: PlaybackState::from(status.as_str()),
                                    });
                                }
                            }
                            None => {
                                debug!("Playback status updates stopped for client {id}");
                                break;
                            }
                        }
                    }
                    signal = metadata_changes.next() => {
                        match signal {
                            Some(signal) => {
                                if let Ok(metadata) = signal.get().await {
                                    let _ = signals_tx.send(ClientSignal::Metadata {
                                        id: id.clone(),
                                        track: TrackInfo::from(metadata),
                                    });
                                }
                            }
                            None => {
                                debug!("Metadata updates stopped for client {id}");
                                break;
                            }
                        }
                    }
                }
            }
        })
    }
}

/// Central session loop.
///
/// Consumes client lifecycle and property signals, elects the active client,
/// and applies consistent updates to the snapshot state. Elapsed time is
/// polled from the active client while media is playing, since position
/// ticks are not signalled.
pub(crate) struct SessionMonitoring {
    clients: ClientMap,
    state: SnapshotState,
    signals_rx: mpsc::UnboundedReceiver<ClientSignal>,
    active: Option<ClientId>,
    poll_interval: Duration,
    video_matchers: Vec<regex::Regex>,
}

impl SessionMonitoring {
    /// Start discovery and the session loop.
    ///
    /// Existing clients are discovered and the initial active client elected
    /// before this returns, so the snapshot reflects any session already
    /// present on the bus.
    ///
    /// # Errors
    /// Returns error if D-Bus discovery setup fails
    pub(crate) async fn start(
        connection: &Connection,
        state: SnapshotState,
        config: Config,
    ) -> Result<Vec<JoinHandle<()>>, MediaSessionError> {
        let clients: ClientMap = Arc::new(RwLock::new(HashMap::new()));
        let (signals_tx, signals_rx) = mpsc::unbounded_channel();

        let discovery_task = ClientDiscovery::start(
            connection,
            Arc::clone(&clients),
            signals_tx,
            config.ignored_clients,
        )
        .await?;

        let video_matchers = compile_matchers(&config.video_clients);

        let mut monitor = Self {
            clients,
            state,
            signals_rx,
            active: None,
            poll_interval: config.poll_interval,
            video_matchers,
        };

        monitor.bootstrap().await;
        let session_task = tokio::spawn(monitor.run());

        Ok(vec![discovery_task, session_task])
    }

    /// Elect the initial active client from those already discovered.
    ///
    /// Prefers a client that is currently playing.
    async fn bootstrap(&mut self) {
        let candidates: Vec<(ClientId, MediaPlayer2PlayerProxy<'static>)> = {
            let clients = self.clients.read().await;
            clients
                .iter()
                .map(|(id, handle)| (id.clone(), handle.player.clone()))
                .collect()
        };

        let mut chosen = candidates.first().map(|(id, _)| id.clone());
        for (id, player) in &candidates {
            let playing = player
                .playback_status()
                .await
                .map(|status| PlaybackState::from(status.as_str()) == PlaybackState::Playing)
                .unwrap_or(false);
            if playing {
                chosen = Some(id.clone());
                break;
            }
        }

        if let Some(id) = chosen {
            self.make_active(id).await;
        }
    }

    async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                signal = self.signals_rx.recv() => {
                    match signal {
                        Some(signal) => self.handle_signal(signal).await,
                        None => break,
                    }
                }
                _ = ticker.tick() => self.poll_position().await,
            }
        }

        debug!("Session monitoring ended");
    }

    async fn handle_signal(&mut self, signal: ClientSignal) {
        match signal {
            ClientSignal::Added(id) => self.handle_client_added(id).await,
            ClientSignal::Removed(id) => self.handle_client_removed(id).await,
            ClientSignal::Status { id, state } => self.handle_status(id, state).await,
            ClientSignal::Metadata { id, track } => self.handle_metadata(id, track).await,
        }
    }

    async fn handle_client_added(&mut self, id: ClientId) {
        if self.active.as_ref() == Some(&id) {
            return;
        }

        if self.active.is_none() {
            self.make_active(id).await;
            return;
        }

        // A client that arrives already playing takes over the session.
        let player = {
            let clients = self.clients.read().await;
            clients.get(&id).map(|handle| handle.player.clone())
        };
        let Some(player) = player else { return };

        let playing = player
            .playback_status()
            .await
            .map(|status| PlaybackState::from(status.as_str()) == PlaybackState::Playing)
            .unwrap_or(false);
        if playing {
            self.make_active(id).await;
        }
    }

    async fn handle_client_removed(&mut self, id: ClientId) {
        if self.active.as_ref() != Some(&id) {
            return;
        }

        let next = {
            let clients = self.clients.read().await;
            clients.keys().next().cloned()
        };

        match next {
            Some(next) => self.make_active(next).await,
            None => {
                self.active = None;
                self.state.apply(SessionUpdate::Ended);
            }
        }
    }

    async fn handle_status(&mut self, id: ClientId, playback: PlaybackState) {
        let playing = playback == PlaybackState::Playing;

        if self.active.as_ref() == Some(&id) {
            self.state.apply(SessionUpdate::Playing(playing));
        } else if playing {
            // Whichever client starts playing owns the session.
            self.make_active(id).await;
        }
    }

    async fn handle_metadata(&mut self, id: ClientId, track: TrackInfo) {
        if self.active.as_ref() != Some(&id) {
            return;
        }

        let app_id = {
            let clients = self.clients.read().await;
            clients.get(&id).map(|handle| handle.app_id.clone())
        };
        let Some(app_id) = app_id else { return };

        self.state.apply(SessionUpdate::Track {
            duration: track.duration,
            video: self.detect_video(&app_id, &track),
        });
    }

    async fn make_active(&mut self, id: ClientId) {
        self.active = Some(id.clone());
        self.refresh_active().await;
    }

    /// Re-read the active client's full state and publish it as one group.
    async fn refresh_active(&mut self) {
        let Some(id) = self.active.clone() else {
            return;
        };

        let handle = {
            let clients = self.clients.read().await;
            clients
                .get(&id)
                .map(|handle| (handle.player.clone(), handle.app_id.clone()))
        };
        let Some((player, app_id)) = handle else {
            // Vanished between signal and lookup; treat as session end.
            self.active = None;
            self.state.apply(SessionUpdate::Ended);
            return;
        };

        let snapshot = self.read_snapshot(&player, &app_id).await;
        self.state.apply(SessionUpdate::Refresh(snapshot));
    }

    /// Read a full consistent snapshot group from one client.
    ///
    /// Individual property failures fall back to empty values rather than
    /// failing the whole group.
    async fn read_snapshot(
        &self,
        player: &MediaPlayer2PlayerProxy<'static>,
        app_id: &str,
    ) -> PlaybackSnapshot {
        let playing = player
            .playback_status()
            .await
            .map(|status| PlaybackState::from(status.as_str()) == PlaybackState::Playing)
            .unwrap_or(false);

        let track = player
            .metadata()
            .await
            .map(TrackInfo::from)
            .unwrap_or_default();

        let elapsed = player.position().await.map(secs_from_micros).unwrap_or(0.0);

        PlaybackSnapshot {
            elapsed,
            duration: track.duration,
            playing,
            video: self.detect_video(app_id, &track),
            client: Some(app_id.to_string()),
        }
    }

    fn detect_video(&self, app_id: &str, track: &TrackInfo) -> bool {
        if self
            .video_matchers
            .iter()
            .any(|matcher| matcher.is_match(app_id))
        {
            return true;
        }

        if let Some(url) = track.url.as_deref() {
            if VIDEO_URL_SUFFIXES.iter().any(|suffix| url.ends_with(suffix)) {
                return true;
            }
        }

        track
            .genres
            .iter()
            .any(|genre| genre.eq_ignore_ascii_case("video"))
    }

    /// Advance elapsed time from the active client while playing.
    async fn poll_position(&self) {
        if !self.state.property().get().playing {
            return;
        }

        let Some(id) = self.active.as_ref() else {
            return;
        };

        let player = {
            let clients = self.clients.read().await;
            clients.get(id).map(|handle| handle.player.clone())
        };
        let Some(player) = player else { return };

        match player.position().await {
            Ok(micros) => {
                self.state
                    .apply(SessionUpdate::Position(secs_from_micros(micros)));
            }
            Err(e) => debug!("Position poll failed for client {id}: {e}"),
        }
    }
}

fn compile_matchers(patterns: &[String]) -> Vec<regex::Regex> {
    patterns
        .iter()
        .filter_map(|pattern| {
            match RegexBuilder::new(pattern).case_insensitive(true).build() {
                Ok(matcher) => Some(matcher),
                Err(e) => {
                    warn!("Ignoring invalid video client pattern '{pattern}': {e}");
                    None
                }
            }
        })
        .collect()
}
