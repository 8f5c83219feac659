//! Authentication methods for the Mood Player backend.

use crate::client::{authorize, error_from_response, expect_success, read_json, send};
use crate::error::{Result, ServerClientError};
use crate::types::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use mood_core::{Session, UserProfile};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

/// Authentication client for the Mood Player backend.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: String,
    token: Option<String>,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: String, token: Option<String>) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Create an account.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<RegisterResponse> {
        let url = format!("{}/api/auth/register", self.base_url);
        debug!(url = %url, email = %email, "Registering account");

        let request = RegisterRequest {
            email,
            password,
            name,
        };
        let response = send(self.http.post(&url).json(&request)).await?;
        let register: RegisterResponse = read_json(response, "register response").await?;

        if !register.success {
            let message = register
                .message
                .unwrap_or_else(|| "登録に失敗しました".to_string());
            warn!(email = %email, error = %message, "Registration refused");
            return Err(ServerClientError::AuthFailed(message));
        }

        info!(email = %email, user_id = ?register.user_id, "Registration successful");
        Ok(register)
    }

    /// Login with e-mail and password.
    ///
    /// Returns the bearer token together with the user behind it.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let url = format!("{}/api/auth/login", self.base_url);
        debug!(url = %url, email = %email, "Attempting login");

        let request = LoginRequest { email, password };
        let response = send(self.http.post(&url).json(&request)).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let err = error_from_response(response).await;
            warn!(email = %email, error = %err, "Login failed: invalid credentials");
            return Err(err);
        }

        let login: LoginResponse = read_json(response, "login response").await?;
        let (true, Some(access_token)) = (login.success, login.access_token) else {
            let message = login
                .message
                .unwrap_or_else(|| "ログインに失敗しました".to_string());
            warn!(email = %email, error = %message, "Login refused");
            return Err(ServerClientError::AuthFailed(message));
        };

        let user = match login.user {
            Some(user) => user,
            // Older servers only return the token
            None => AuthClient::new(self.http, self.base_url.clone(), Some(access_token.clone()))
                .current_user()
                .await?
                .ok_or_else(|| ServerClientError::AuthFailed("Session not found".to_string()))?,
        };

        info!(user_id = %user.id, "Login successful");
        Ok(Session { access_token, user })
    }

    /// Invalidate the token server-side.
    pub async fn logout(&self) -> Result<()> {
        let Some(token) = self.token.as_deref() else {
            return Ok(());
        };

        let url = format!("{}/api/auth/logout", self.base_url);
        debug!(url = %url, "Logging out");

        let response = send(self.http.post(&url).bearer_auth(token)).await?;
        expect_success(response).await
    }

    /// User behind the current token.
    ///
    /// Returns `Ok(None)` when there is no token or the server no longer
    /// accepts it.
    pub async fn current_user(&self) -> Result<Option<UserProfile>> {
        if self.token.is_none() {
            return Ok(None);
        }

        let url = format!("{}/api/auth/me", self.base_url);
        debug!(url = %url, "Getting current user info");

        let response = send(authorize(self.http.get(&url), self.token.as_deref())).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            debug!("Stored token rejected");
            return Ok(None);
        }

        let user: UserProfile = read_json(response, "user info").await?;
        Ok(Some(user))
    }
}
