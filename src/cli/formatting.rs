//! Formatting utilities for CLI output.
//!
//! Provides consistent formatting for durations, headers and errors in
//! command output.

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";

    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Formats section headers with styling
pub fn format_header(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::CYAN, text, Colors::RESET)
}

/// Formats error messages with styling
pub fn format_error(text: &str) -> String {
    format!("{}{}Error:{} {text}", Colors::BOLD, Colors::RED, Colors::RESET)
}

/// Format a seconds value as MM:SS
pub fn format_duration(secs: f64) -> String {
    let total_seconds = if secs.is_finite() && secs > 0.0 {
        secs as u64
    } else {
        0
    };
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_durations_as_minutes_and_seconds() {
        assert_eq!(format_duration(0.0), "00:00");
        assert_eq!(format_duration(61.4), "01:01");
        assert_eq!(format_duration(3600.0), "60:00");
        assert_eq!(format_duration(-5.0), "00:00");
        assert_eq!(format_duration(f64::NAN), "00:00");
    }
}
