use std::path::Path;

use thiserror::Error;

/// Error types for the nowplay application.
///
/// This enum represents all possible errors that can occur during
/// configuration loading and parsing operations.
#[derive(Error, Debug)]
pub enum NowPlayError {
    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },
}

/// A specialized `Result` type for nowplay operations.
///
/// This type alias simplifies error handling by defaulting the error type
/// to `NowPlayError` for all nowplay operations.
pub type Result<T> = std::result::Result<T, NowPlayError>;

impl NowPlayError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        NowPlayError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }
}
