use crate::services::common::Property;

use super::types::{PlaybackSnapshot, SessionUpdate, sanitize_secs};

/// Applies session updates to the shared snapshot cell.
///
/// All mutation goes through [`SnapshotState::apply`], which swaps the whole
/// snapshot value in a single write. Observers therefore never see a torn
/// field combination, and a no-op update produces no notification.
///
/// Updates come from a single writer (the session monitoring loop); partial
/// updates read-modify-write the current group under that discipline.
#[derive(Clone, Debug)]
pub(crate) struct SnapshotState {
    snapshot: Property<PlaybackSnapshot>,
}

impl SnapshotState {
    /// Create state holding the default (empty) snapshot.
    pub(crate) fn new() -> Self {
        Self {
            snapshot: Property::new(PlaybackSnapshot::default()),
        }
    }

    /// The underlying snapshot cell, for read accessors and watchers.
    pub(crate) fn property(&self) -> &Property<PlaybackSnapshot> {
        &self.snapshot
    }

    /// Apply one session update, replacing the snapshot group atomically.
    pub(crate) fn apply(&self, update: SessionUpdate) {
        let next = match update {
            SessionUpdate::Refresh(snapshot) => snapshot.sanitized(),
            SessionUpdate::Playing(playing) => {
                let mut snapshot = self.snapshot.get();
                snapshot.playing = playing;
                snapshot
            }
            SessionUpdate::Position(elapsed) => {
                let mut snapshot = self.snapshot.get();
                snapshot.elapsed = sanitize_secs(elapsed);
                snapshot
            }
            SessionUpdate::Track { duration, video } => {
                let mut snapshot = self.snapshot.get();
                snapshot.duration = sanitize_secs(duration);
                snapshot.video = video;
                snapshot
            }
            SessionUpdate::Ended => PlaybackSnapshot::default(),
        };

        self.snapshot.set(next);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use futures::StreamExt;

    use super::*;

    fn sample_snapshot() -> PlaybackSnapshot {
        PlaybackSnapshot {
            elapsed: 12.5,
            duration: 180.0,
            playing: true,
            video: false,
            client: Some("spotify".to_string()),
        }
    }

    #[test]
    fn starts_with_default_snapshot() {
        let state = SnapshotState::new();
        assert_eq!(state.property().get(), PlaybackSnapshot::default());
    }

    #[test]
    fn refresh_replaces_the_whole_group() {
        let state = SnapshotState::new();
        state.apply(SessionUpdate::Refresh(sample_snapshot()));

        let snapshot = state.property().get();
        assert_eq!(snapshot, sample_snapshot());
    }

    #[test]
    fn refresh_sanitizes_time_fields() {
        let state = SnapshotState::new();
        state.apply(SessionUpdate::Refresh(PlaybackSnapshot {
            elapsed: -3.0,
            duration: f64::INFINITY,
            playing: true,
            video: true,
            client: Some("mpv".to_string()),
        }));

        let snapshot = state.property().get();
        assert_eq!(snapshot.elapsed, 0.0);
        assert_eq!(snapshot.duration, 0.0);
        assert!(snapshot.playing);
    }

    #[test]
    fn partial_updates_keep_the_client() {
        let state = SnapshotState::new();
        state.apply(SessionUpdate::Refresh(sample_snapshot()));

        state.apply(SessionUpdate::Playing(false));
        state.apply(SessionUpdate::Position(42.0));
        state.apply(SessionUpdate::Track {
            duration: 240.0,
            video: true,
        });

        let snapshot = state.property().get();
        assert_eq!(snapshot.client.as_deref(), Some("spotify"));
        assert!(!snapshot.playing);
        assert_eq!(snapshot.elapsed, 42.0);
        assert_eq!(snapshot.duration, 240.0);
        assert!(snapshot.video);
    }

    #[test]
    fn ended_restores_the_default_snapshot() {
        let state = SnapshotState::new();
        state.apply(SessionUpdate::Refresh(sample_snapshot()));
        state.apply(SessionUpdate::Ended);

        assert_eq!(state.property().get(), PlaybackSnapshot::default());
    }

    #[tokio::test]
    async fn changing_update_notifies_exactly_once_and_noop_not_at_all() {
        let state = SnapshotState::new();
        let mut stream = Box::pin(state.property().watch());

        // Subscribers receive the current value immediately.
        assert_eq!(stream.next().await.unwrap(), PlaybackSnapshot::default());

        // A no-op update must not produce an item; the next item observed
        // has to be the genuinely changed snapshot.
        state.apply(SessionUpdate::Playing(false));
        state.apply(SessionUpdate::Refresh(sample_snapshot()));

        assert_eq!(stream.next().await.unwrap(), sample_snapshot());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_readers_never_observe_torn_groups() {
        let state = SnapshotState::new();

        let group_a = PlaybackSnapshot {
            elapsed: 10.0,
            duration: 100.0,
            playing: true,
            video: false,
            client: Some("spotify".to_string()),
        };
        let group_b = PlaybackSnapshot {
            elapsed: 90.0,
            duration: 5400.0,
            playing: false,
            video: true,
            client: Some("mpv".to_string()),
        };

        let writer = {
            let state = state.clone();
            let (a, b) = (group_a.clone(), group_b.clone());
            tokio::spawn(async move {
                for i in 0..1000 {
                    let next = if i % 2 == 0 { a.clone() } else { b.clone() };
                    state.apply(SessionUpdate::Refresh(next));
                    tokio::task::yield_now().await;
                }
            })
        };

        let readers: Vec<_> = (0..3)
            .map(|_| {
                let state = state.clone();
                let (a, b) = (group_a.clone(), group_b.clone());
                let default = PlaybackSnapshot::default();
                tokio::spawn(async move {
                    for _ in 0..1000 {
                        let snapshot = state.property().get();
                        assert!(
                            snapshot == a || snapshot == b || snapshot == default,
                            "torn snapshot observed: {snapshot:?}"
                        );
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }
    }
}
