//! Error types for the Mood Player server client.

use mood_core::MoodError;
use thiserror::Error;

/// Errors that can occur when talking to the Mood Player backend.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but no token available
    #[error("Authentication required")]
    AuthRequired,

    /// Authentication failed (invalid credentials or expired token)
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Websocket connection failed or dropped
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Realtime server refused or answered out of protocol
    #[error("Realtime protocol error: {0}")]
    Protocol(String),

    /// Realtime handshake took too long
    #[error("Timed out: {0}")]
    Timeout(String),
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;

impl From<ServerClientError> for MoodError {
    fn from(err: ServerClientError) -> Self {
        match err {
            ServerClientError::AuthRequired => MoodError::auth("ログインが必要です"),
            ServerClientError::AuthFailed(message) => MoodError::auth(message),
            ServerClientError::ServerError { message, .. }
            | ServerClientError::ParseError(message) => MoodError::backend(message),
            ServerClientError::InvalidUrl(message) => MoodError::not_configured(message),
            ServerClientError::Protocol(message) => MoodError::realtime(message),
            err @ (ServerClientError::Request(_)
            | ServerClientError::ServerUnreachable(_)
            | ServerClientError::WebSocket(_)
            | ServerClientError::Timeout(_)) => MoodError::network(err.to_string()),
        }
    }
}
