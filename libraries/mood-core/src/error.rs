/// Core error types for Mood Player
use thiserror::Error;

/// Result type alias using `MoodError`
pub type Result<T> = std::result::Result<T, MoodError>;

/// Core error type shared by every backend-facing trait
#[derive(Error, Debug)]
pub enum MoodError {
    /// Mood key not present in the mood table
    #[error("Unknown mood: {0}")]
    UnknownMood(String),

    /// Feature is not configured (missing backend URL, realtime endpoint, ...)
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// Credentials rejected or session missing
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Backend reachable but answered with an error
    #[error("Backend error: {0}")]
    Backend(String),

    /// Backend unreachable or transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Realtime channel error or timeout
    #[error("Realtime error: {0}")]
    Realtime(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl MoodError {
    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a realtime error
    pub fn realtime(msg: impl Into<String>) -> Self {
        Self::Realtime(msg.into())
    }

    /// Create a not-configured error
    pub fn not_configured(msg: impl Into<String>) -> Self {
        Self::NotConfigured(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the failure came from the transport rather than the backend's answer
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Realtime(_))
    }
}
