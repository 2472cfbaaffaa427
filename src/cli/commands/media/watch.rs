use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;

use crate::{
    cli::{Command, CommandResult, formatting::format_duration, types::CommandMetadata},
    config::Config,
    services::media_session::PlaybackSnapshot,
};

use super::start_services;

/// Command to stream now-playing state changes
///
/// Prints one line per snapshot change until interrupted.
pub struct WatchCommand {
    config: Arc<Config>,
}

impl WatchCommand {
    /// Creates a new WatchCommand
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for WatchCommand {
    /// Stream now-playing state changes
    ///
    /// # Errors
    ///
    /// Returns CliError if the media session service fails to start
    async fn execute(&self, _args: &[String]) -> CommandResult {
        let services = start_services(&self.config).await?;

        println!("Watching now-playing state changes...");
        println!("Press Ctrl+C to stop");

        let mut stream = Box::pin(services.media.watch());
        while let Some(snapshot) = stream.next().await {
            println!("{}", format_snapshot_line(&snapshot));
        }

        Ok("Watch ended".to_string())
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "watch".to_string(),
            description: "Stream now-playing state changes".to_string(),
            category: "media".to_string(),
            examples: vec!["nowplay watch".to_string()],
        }
    }
}

fn format_snapshot_line(snapshot: &PlaybackSnapshot) -> String {
    match &snapshot.client {
        None => "-- no media session".to_string(),
        Some(client) => {
            let glyph = if snapshot.playing { "▶" } else { "⏸" };
            let kind = if snapshot.video { "video" } else { "audio" };
            if snapshot.duration > 0.0 {
                format!(
                    "{glyph} {client} [{kind}] {} / {}",
                    format_duration(snapshot.elapsed),
                    format_duration(snapshot.duration),
                )
            } else {
                format!(
                    "{glyph} {client} [{kind}] {}",
                    format_duration(snapshot.elapsed)
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_empty_session_line() {
        assert_eq!(
            format_snapshot_line(&PlaybackSnapshot::default()),
            "-- no media session"
        );
    }

    #[test]
    fn formats_playing_video_line() {
        let snapshot = PlaybackSnapshot {
            elapsed: 65.0,
            duration: 300.0,
            playing: true,
            video: true,
            client: Some("firefox".to_string()),
        };
        assert_eq!(
            format_snapshot_line(&snapshot),
            "▶ firefox [video] 01:05 / 05:00"
        );
    }

    #[test]
    fn omits_duration_when_unknown() {
        let snapshot = PlaybackSnapshot {
            elapsed: 10.0,
            duration: 0.0,
            playing: false,
            video: false,
            client: Some("spotify".to_string()),
        };
        assert_eq!(format_snapshot_line(&snapshot), "⏸ spotify [audio] 00:10");
    }
}
