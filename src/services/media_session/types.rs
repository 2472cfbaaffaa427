use std::collections::HashMap;
use std::fmt;

use zbus::zvariant::OwnedValue;

pub(crate) const MPRIS_BUS_PREFIX: &str = "org.mpris.MediaPlayer2.";

/// Unique identifier for a media client on the session bus
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    /// Create a ClientId from a D-Bus bus name
    pub fn from_bus_name(bus_name: &str) -> Self {
        Self(bus_name.to_string())
    }

    /// Get the D-Bus bus name
    pub fn bus_name(&self) -> &str {
        &self.0
    }

    /// Short application identifier derived from the bus name.
    ///
    /// Strips the MPRIS prefix and any `.instance` suffix, so
    /// `org.mpris.MediaPlayer2.firefox.instance_1_23` becomes `firefox`.
    pub fn app_id(&self) -> &str {
        let name = self.0.strip_prefix(MPRIS_BUS_PREFIX).unwrap_or(&self.0);
        match name.find(".instance") {
            Some(idx) => &name[..idx],
            None => name,
        }
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current playback state reported by a media client
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackState {
    /// Client is currently playing
    Playing,

    /// Client is paused
    Paused,

    /// Client is stopped
    Stopped,
}

impl From<&str> for PlaybackState {
    fn from(status: &str) -> Self {
        match status {
            "Playing" => Self::Playing,
            "Paused" => Self::Paused,
            _ => Self::Stopped,
        }
    }
}

/// One consistent group of now-playing fields.
///
/// Every update replaces the whole group at once, so any snapshot read
/// reflects a single source event. The default value is the state before
/// any media session has been observed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackSnapshot {
    /// Seconds since track start; never negative
    pub elapsed: f64,

    /// Total track length in seconds; 0 when unknown (live streams)
    pub duration: f64,

    /// Whether media is actively advancing
    pub playing: bool,

    /// Whether the current media is video rather than audio-only
    pub video: bool,

    /// Identifier of the application producing media; None when no
    /// media session exists
    pub client: Option<String>,
}

impl PlaybackSnapshot {
    /// Clamp time fields to sane values before the group is published.
    pub(crate) fn sanitized(mut self) -> Self {
        self.elapsed = sanitize_secs(self.elapsed);
        self.duration = sanitize_secs(self.duration);
        self
    }
}

/// Unit of change applied to the snapshot tracker.
///
/// Partial updates never carry a client identity; only `Refresh` (a full
/// consistent group) and `Ended` can change which application the snapshot
/// describes. That rules out a fresh playback flag paired with a stale
/// client from a previous application.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SessionUpdate {
    /// Full consistent group from the backend
    Refresh(PlaybackSnapshot),

    /// Playback state flip for the current client
    Playing(bool),

    /// Elapsed-time advance for the current client
    Position(f64),

    /// Track-level fields changed under the same client
    Track {
        /// New track length in seconds
        duration: f64,
        /// Whether the new track is video
        video: bool,
    },

    /// The active session disappeared
    Ended,
}

/// Track metadata subset consumed to derive snapshot fields
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TrackInfo {
    /// Track length in seconds; 0 when absent
    pub(crate) duration: f64,

    /// Source URL of the track, when reported
    pub(crate) url: Option<String>,

    /// Genre tags, when reported
    pub(crate) genres: Vec<String>,
}

impl From<HashMap<String, OwnedValue>> for TrackInfo {
    fn from(metadata: HashMap<String, OwnedValue>) -> Self {
        let mut info = Self::default();

        if let Some(length) = metadata.get("mpris:length") {
            if let Ok(micros) = i64::try_from(length.clone()) {
                info.duration = secs_from_micros(micros);
            } else if let Ok(micros) = u64::try_from(length.clone()) {
                info.duration = secs_from_micros(micros.min(i64::MAX as u64) as i64);
            }
        }

        if let Some(url) = metadata.get("xesam:url") {
            if let Ok(url_str) = String::try_from(url.clone()) {
                info.url = Some(url_str);
            }
        }

        if let Some(genre) = metadata.get("xesam:genre") {
            if let Ok(array) = <&zbus::zvariant::Array>::try_from(genre) {
                info.genres = array
                    .iter()
                    .filter_map(|genre| {
                        if let Ok(s) = genre.downcast_ref::<String>() {
                            Some(s.clone())
                        } else if let Ok(s) = genre.downcast_ref::<&str>() {
                            Some(s.to_string())
                        } else {
                            None
                        }
                    })
                    .collect();
            }
        }

        info
    }
}

/// Convert a microsecond count to non-negative seconds
pub(crate) fn secs_from_micros(micros: i64) -> f64 {
    if micros <= 0 {
        0.0
    } else {
        micros as f64 / 1_000_000.0
    }
}

/// Clamp a seconds value to finite, non-negative
pub(crate) fn sanitize_secs(secs: f64) -> f64 {
    if secs.is_finite() && secs > 0.0 { secs } else { 0.0 }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn app_id_strips_prefix_and_instance_suffix() {
        let plain = ClientId::from_bus_name("org.mpris.MediaPlayer2.spotify");
        assert_eq!(plain.app_id(), "spotify");

        let instanced = ClientId::from_bus_name("org.mpris.MediaPlayer2.firefox.instance_1_23");
        assert_eq!(instanced.app_id(), "firefox");

        let foreign = ClientId::from_bus_name("org.example.Player");
        assert_eq!(foreign.app_id(), "org.example.Player");
    }

    #[test]
    fn playback_state_parses_known_statuses() {
        assert_eq!(PlaybackState::from("Playing"), PlaybackState::Playing);
        assert_eq!(PlaybackState::from("Paused"), PlaybackState::Paused);
        assert_eq!(PlaybackState::from("Stopped"), PlaybackState::Stopped);
        assert_eq!(PlaybackState::from("garbage"), PlaybackState::Stopped);
    }

    #[test]
    fn default_snapshot_is_empty() {
        let snapshot = PlaybackSnapshot::default();
        assert_eq!(snapshot.elapsed, 0.0);
        assert_eq!(snapshot.duration, 0.0);
        assert!(!snapshot.playing);
        assert!(!snapshot.video);
        assert!(snapshot.client.is_none());
    }

    #[test]
    fn sanitized_rejects_negative_and_non_finite_times() {
        let snapshot = PlaybackSnapshot {
            elapsed: -4.0,
            duration: f64::NAN,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(snapshot.elapsed, 0.0);
        assert_eq!(snapshot.duration, 0.0);
    }

    #[test]
    fn secs_from_micros_clamps_negative() {
        assert_eq!(secs_from_micros(-1), 0.0);
        assert_eq!(secs_from_micros(0), 0.0);
        assert!((secs_from_micros(1_500_000) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn track_info_reads_length_url_and_genre() {
        use zbus::zvariant::Value;

        let mut metadata = HashMap::new();
        metadata.insert(
            "mpris:length".to_string(),
            Value::from(180_000_000_i64).try_to_owned().unwrap(),
        );
        metadata.insert(
            "xesam:url".to_string(),
            Value::from("file:///music/track.flac").try_to_owned().unwrap(),
        );

        let info = TrackInfo::from(metadata);
        assert!((info.duration - 180.0).abs() < f64::EPSILON);
        assert_eq!(info.url.as_deref(), Some("file:///music/track.flac"));
        assert!(info.genres.is_empty());
    }
}
