//! Main Mood Player backend client.

use crate::auth::AuthClient;
use crate::chat::ChatClient;
use crate::error::{Result, ServerClientError};
use crate::social::SocialClient;
use crate::types::{ErrorBody, ServerConfig};
use async_trait::async_trait;
use mood_core::{
    Backend, ChatMessage, FriendRequest, NewChatMessage, RegisterOutcome, Session, UserProfile,
    UserSummary,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Main client for the Mood Player backend.
///
/// Holds the HTTP client and the bearer token; the token is attached to
/// every request except register and login.
///
/// # Example
///
/// ```ignore
/// use mood_server_client::{MoodServerClient, ServerConfig};
///
/// let client = MoodServerClient::new(ServerConfig::new("http://localhost:8000"))?;
/// let session = client.auth().await.login("aki@example.com", "secret123").await?;
/// client.set_token(Some(session.access_token.clone())).await;
/// ```
#[derive(Clone)]
pub struct MoodServerClient {
    http: Client,
    config: Arc<RwLock<ServerConfig>>,
}

impl MoodServerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("MoodPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ServerClientError::Request)?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(ServerConfig {
                url,
                access_token: config.access_token,
            })),
        })
    }

    /// Get the API base URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Current access token.
    pub async fn token(&self) -> Option<String> {
        self.config.read().await.access_token.clone()
    }

    /// Set or clear the access token.
    pub async fn set_token(&self, access_token: Option<String>) {
        self.config.write().await.access_token = access_token;
    }

    /// Authentication sub-client.
    pub async fn auth(&self) -> AuthClient<'_> {
        let config = self.config.read().await;
        AuthClient::new(&self.http, config.url.clone(), config.access_token.clone())
    }

    /// Social sub-client. Requires a token.
    pub async fn social(&self) -> Result<SocialClient<'_>> {
        let config = self.config.read().await;
        let token = config
            .access_token
            .clone()
            .ok_or(ServerClientError::AuthRequired)?;
        Ok(SocialClient::new(&self.http, config.url.clone(), token))
    }

    /// Chat sub-client. The token is optional; anonymous listeners chat too.
    pub async fn chat(&self) -> ChatClient<'_> {
        let config = self.config.read().await;
        ChatClient::new(&self.http, config.url.clone(), config.access_token.clone())
    }
}

impl std::fmt::Debug for MoodServerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoodServerClient").finish_non_exhaustive()
    }
}

// ===== Shared request plumbing =====

/// Attach the bearer token when present.
pub(crate) fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Send a request, classifying connection failures.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response> {
    request.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            ServerClientError::ServerUnreachable(e.to_string())
        } else {
            ServerClientError::Request(e)
        }
    })
}

/// Parse a successful JSON response, or turn the failure into an error.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ServerClientError::ParseError(format!("Failed to parse {what}: {e}")))
}

/// Succeed on any 2xx, ignoring the body.
pub(crate) async fn expect_success(response: Response) -> Result<()> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from_response(response).await)
    }
}

/// Build an error from a non-success response.
///
/// The message comes from `detail` or `message` when the body is JSON.
pub(crate) async fn error_from_response(response: Response) -> ServerClientError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| {
            if text.trim().is_empty() {
                format!("HTTP error! status: {}", status.as_u16())
            } else {
                text
            }
        });

    debug!(status = %status, message = %message, "Request failed");

    if status == StatusCode::UNAUTHORIZED {
        ServerClientError::AuthFailed(message)
    } else {
        ServerClientError::ServerError {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl Backend for MoodServerClient {
    async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> mood_core::Result<RegisterOutcome> {
        let response = self.auth().await.register(email, password, name).await?;
        Ok(response.into())
    }

    async fn login(&self, email: &str, password: &str) -> mood_core::Result<Session> {
        let session = self.auth().await.login(email, password).await?;
        self.set_token(Some(session.access_token.clone())).await;
        Ok(session)
    }

    async fn logout(&self) -> mood_core::Result<()> {
        let result = self.auth().await.logout().await;
        // Local token goes regardless of the server's answer
        self.set_token(None).await;
        info!("Logged out");
        result.map_err(Into::into)
    }

    async fn set_access_token(&self, token: Option<String>) {
        self.set_token(token).await;
    }

    async fn current_user(&self) -> mood_core::Result<Option<UserProfile>> {
        if !self.is_authenticated().await {
            return Ok(None);
        }
        Ok(self.auth().await.current_user().await?)
    }

    async fn search_users(&self, query: &str) -> mood_core::Result<Vec<UserSummary>> {
        Ok(self.social().await?.search_users(query).await?)
    }

    async fn send_friend_request(&self, to_user_id: &str) -> mood_core::Result<()> {
        Ok(self.social().await?.send_friend_request(to_user_id).await?)
    }

    async fn friend_requests(&self) -> mood_core::Result<Vec<FriendRequest>> {
        Ok(self.social().await?.friend_requests().await?)
    }

    async fn accept_friend_request(&self, request_id: &str) -> mood_core::Result<()> {
        Ok(self.social().await?.accept_friend_request(request_id).await?)
    }

    async fn reject_friend_request(&self, request_id: &str) -> mood_core::Result<()> {
        Ok(self.social().await?.reject_friend_request(request_id).await?)
    }

    async fn friends(&self) -> mood_core::Result<Vec<UserSummary>> {
        Ok(self.social().await?.friends().await?)
    }

    async fn delete_friend(&self, friend_id: &str) -> mood_core::Result<()> {
        Ok(self.social().await?.delete_friend(friend_id).await?)
    }

    async fn chat_messages(&self, room_id: &str) -> mood_core::Result<Vec<ChatMessage>> {
        Ok(self.chat().await.messages(room_id).await?)
    }

    async fn post_chat_message(&self, message: &NewChatMessage) -> mood_core::Result<()> {
        Ok(self.chat().await.post(message).await?)
    }
}
