#![allow(missing_docs)]

use std::collections::HashMap;
use zbus::{Result, proxy, zvariant::OwnedValue};

/// MPRIS MediaPlayer2 interface proxy
///
/// Provides access to the desktop entry naming a media client
#[proxy(
    interface = "org.mpris.MediaPlayer2",
    default_service = "org.mpris.MediaPlayer2",
    default_path = "/org/mpris/MediaPlayer2"
)]
pub trait MediaPlayer2 {
    /// Desktop entry name for the client
    #[zbus(property)]
    fn desktop_entry(&self) -> Result<String>;
}

/// MPRIS MediaPlayer2.Player interface proxy
///
/// Provides read access to playback state, track metadata and position
#[proxy(
    interface = "org.mpris.MediaPlayer2.Player",
    default_service = "org.mpris.MediaPlayer2",
    default_path = "/org/mpris/MediaPlayer2"
)]
pub trait MediaPlayer2Player {
    /// Current playback status (Playing, Paused, Stopped)
    #[zbus(property)]
    fn playback_status(&self) -> Result<String>;

    /// Metadata for the current track
    #[zbus(property)]
    fn metadata(&self) -> Result<HashMap<String, OwnedValue>>;

    /// Current playback position in microseconds.
    ///
    /// Position changes are not signalled, so the property must not be
    /// cached; every read goes to the client.
    #[zbus(property(emits_changed_signal = "false"))]
    fn position(&self) -> Result<i64>;
}
