/// Errors that can occur during media session operations
#[derive(thiserror::Error, Debug)]
pub enum MediaSessionError {
    /// D-Bus communication error
    #[error("D-Bus operation failed: {0}")]
    DbusError(#[from] zbus::Error),

    /// Failed to initialize the media session service
    #[error("Failed to initialize media session service: {0}")]
    InitializationFailed(String),
}
