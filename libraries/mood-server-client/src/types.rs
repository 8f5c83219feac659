//! Wire types for the Mood Player backend API.

use mood_core::{RegisterOutcome, UserProfile};
use serde::{Deserialize, Serialize};

/// Server configuration for connecting to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// API base URL (e.g., "http://localhost:8000")
    pub url: String,
    /// Bearer token from login (if authenticated)
    pub access_token: Option<String>,
}

impl ServerConfig {
    /// Create a new server configuration with just a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
        }
    }

    /// Create a server configuration with a persisted token.
    pub fn with_token(url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: Some(access_token.into()),
        }
    }
}

/// Register request body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: Option<&'a str>,
}

/// Register response body.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<RegisterResponse> for RegisterOutcome {
    fn from(response: RegisterResponse) -> Self {
        Self {
            user_id: response.user_id,
            message: response.message,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Login response body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Friend request body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct FriendRequestBody<'a> {
    pub to_user_id: &'a str,
}

/// Error body: `detail` (string or validation list) or `message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        match self.detail {
            Some(serde_json::Value::String(detail)) => Some(detail),
            Some(serde_json::Value::Null) | None => self.message,
            Some(other) => Some(other.to_string()),
        }
    }
}

/// List endpoints answer either a bare array or `{"<key>": [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    Bare(Vec<T>),
    Users { users: Vec<T> },
    Friends { friends: Vec<T> },
    Requests { requests: Vec<T> },
    Messages { messages: Vec<T> },
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Bare(items)
            | Listing::Users { users: items }
            | Listing::Friends { friends: items }
            | Listing::Requests { requests: items }
            | Listing::Messages { messages: items } => items,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use mood_core::UserSummary;

    #[test]
    fn listing_accepts_bare_and_wrapped() {
        let bare: Listing<UserSummary> =
            serde_json::from_str(r#"[{"id":"1","name":"Aki","email":null}]"#).unwrap();
        assert_eq!(bare.into_vec().len(), 1);

        let wrapped: Listing<UserSummary> =
            serde_json::from_str(r#"{"friends":[{"id":"1","name":"Aki","email":null},{"id":"2","name":"Mio","email":"m@x.jp"}]}"#)
                .unwrap();
        assert_eq!(wrapped.into_vec().len(), 2);
    }

    #[test]
    fn error_body_prefers_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail":"Email already registered","message":"x"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Email already registered"));

        let body: ErrorBody = serde_json::from_str(r#"{"message":"nope"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("nope"));

        let body: ErrorBody =
            serde_json::from_str(r#"{"detail":[{"loc":["body","email"],"msg":"field required"}]}"#)
                .unwrap();
        assert!(body.into_message().unwrap().contains("field required"));
    }
}
