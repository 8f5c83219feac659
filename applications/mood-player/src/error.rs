/// Player error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlayerError>;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Preferences error: {0}")]
    Preferences(String),

    #[error("Backend error: {0}")]
    Backend(#[from] mood_core::MoodError),

    #[error("Server client error: {0}")]
    ServerClient(#[from] mood_server_client::ServerClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<url::ParseError> for PlayerError {
    fn from(err: url::ParseError) -> Self {
        PlayerError::InvalidUrl(err.to_string())
    }
}

impl From<config::ConfigError> for PlayerError {
    fn from(err: config::ConfigError) -> Self {
        PlayerError::Config(err.to_string())
    }
}
