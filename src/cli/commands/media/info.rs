use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{Command, CommandResult, formatting::format_duration, types::CommandMetadata},
    config::Config,
    services::media_session::PlaybackSnapshot,
};

use super::start_services;

/// Command to show the current now-playing state
///
/// Displays the producing client, playback state, media kind and position.
pub struct InfoCommand {
    config: Arc<Config>,
}

impl InfoCommand {
    /// Creates a new InfoCommand
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for InfoCommand {
    /// Show the current now-playing state
    ///
    /// # Errors
    ///
    /// Returns CliError if the media session service fails to start
    async fn execute(&self, _args: &[String]) -> CommandResult {
        let services = start_services(&self.config).await?;
        let snapshot = services.media.snapshot();

        let Some(client) = snapshot.client.clone() else {
            return Ok("No media session active\n".to_string());
        };

        let mut output = String::new();
        output.push_str(&format!("Client: {client}\n"));

        let state_str = if snapshot.playing {
            "▶ Playing"
        } else {
            "⏸ Paused"
        };
        output.push_str(&format!("State: {state_str}\n"));
        output.push_str(&format!(
            "Media: {}\n\n",
            if snapshot.video { "Video" } else { "Audio" }
        ));

        Self::add_position_info(&snapshot, &mut output);

        Ok(output)
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "info".to_string(),
            description: "Show the current now-playing state".to_string(),
            category: "media".to_string(),
            examples: vec!["nowplay info".to_string()],
        }
    }
}

impl InfoCommand {
    fn add_position_info(snapshot: &PlaybackSnapshot, output: &mut String) {
        if snapshot.duration > 0.0 {
            let percentage =
                (snapshot.elapsed / snapshot.duration * 100.0).clamp(0.0, 100.0) as u32;
            output.push_str(&format!(
                "Position: {} / {} ({percentage}%)\n",
                format_duration(snapshot.elapsed),
                format_duration(snapshot.duration),
            ));

            Self::add_progress_bar(percentage, output);
        } else {
            output.push_str(&format!(
                "Position: {}\n",
                format_duration(snapshot.elapsed)
            ));
        }
    }

    fn add_progress_bar(percentage: u32, output: &mut String) {
        let bar_width = 30_usize;
        let filled = bar_width * percentage as usize / 100;
        let empty = bar_width - filled;
        output.push_str("Progress: [");
        output.push_str(&"=".repeat(filled));
        output.push_str(&" ".repeat(empty));
        output.push_str("]\n");
    }
}
