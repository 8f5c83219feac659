//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No mood has been selected
    #[error("No mood selected")]
    NoMood,

    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// The environment refused to start playback (autoplay policy, ...)
    #[error("Playback rejected: {0}")]
    PlaybackRejected(String),

    /// Audio element error
    #[error("Audio element error: {0}")]
    AudioElement(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
