//! Sign-up, sign-in, session restore and sign-out
//!
//! Sign-in and sign-up run on their own tasks and report back as
//! `AuthReply`s. Sign-out is bounded by the logout timeout and runs inline.

use mood_core::{Backend, MoodError, RegisterOutcome, Session, UserProfile};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, info, warn};

/// Time the backend gets to confirm a logout before local cleanup goes ahead
pub const LOGOUT_TIMEOUT: Duration = Duration::from_secs(2);

/// Shortest accepted password
pub const MIN_PASSWORD_LEN: usize = 6;

/// How a sign-out ended on the backend side
///
/// Local cleanup happens in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignOut {
    Confirmed,
    Failed(String),
    TimedOut,
}

/// Result of a background auth call; `Err` is inline form text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthReply {
    SignedIn(Result<Session, String>),
    SignedUp(Result<RegisterOutcome, String>),
}

/// Signed-in user and the auth calls around it
pub struct SessionManager {
    backend: Arc<dyn Backend>,
    user: Option<UserProfile>,
    logout_timeout: Duration,
    replies_tx: mpsc::UnboundedSender<AuthReply>,
    replies_rx: mpsc::UnboundedReceiver<AuthReply>,
}

impl SessionManager {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            user: None,
            logout_timeout: LOGOUT_TIMEOUT,
            replies_tx,
            replies_rx,
        }
    }

    #[must_use]
    pub fn with_logout_timeout(mut self, logout_timeout: Duration) -> Self {
        self.logout_timeout = logout_timeout;
        self
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Resume a session from a persisted token
    ///
    /// Returns the user when the token is still good. `Ok(None)` means the
    /// token was rejected and should be forgotten; errors leave the token in
    /// place for the next start.
    pub async fn restore(&mut self, token: String) -> Result<Option<UserProfile>, MoodError> {
        self.backend.set_access_token(Some(token)).await;

        match self.backend.current_user().await {
            Ok(Some(user)) => {
                info!(user_id = %user.id, "Session restored");
                self.user = Some(user.clone());
                Ok(Some(user))
            }
            Ok(None) => {
                debug!("Persisted token no longer valid");
                self.backend.set_access_token(None).await;
                self.user = None;
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Could not check persisted session");
                Err(e)
            }
        }
    }

    /// Sign in with e-mail and password
    ///
    /// Form errors come back at once; otherwise the login runs in the
    /// background and ends in `AuthReply::SignedIn`.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<(), String> {
        let email = email.trim().to_string();
        validate_credentials(&email, password)?;

        let password = password.to_string();
        let backend = Arc::clone(&self.backend);
        let replies = self.replies_tx.clone();
        tokio::spawn(async move {
            let result = match backend.login(&email, &password).await {
                Ok(session) => Ok(session),
                Err(e) => {
                    warn!(error = %e, "Sign-in failed");
                    Err(form_error(&e))
                }
            };
            let _ = replies.send(AuthReply::SignedIn(result));
        });
        Ok(())
    }

    /// Create an account
    ///
    /// The name defaults to the e-mail local part. Form errors come back at
    /// once; otherwise the outcome arrives as `AuthReply::SignedUp`.
    pub fn sign_up(&self, email: &str, password: &str, name: Option<&str>) -> Result<(), String> {
        let email = email.trim().to_string();
        validate_credentials(&email, password)?;

        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default_name(&email));

        let password = password.to_string();
        let backend = Arc::clone(&self.backend);
        let replies = self.replies_tx.clone();
        tokio::spawn(async move {
            let result = match backend.register(&email, &password, Some(&name)).await {
                Ok(outcome) => {
                    info!(user_id = ?outcome.user_id, "Account created");
                    Ok(outcome)
                }
                Err(e) => {
                    warn!(error = %e, "Sign-up failed");
                    Err(form_error(&e))
                }
            };
            let _ = replies.send(AuthReply::SignedUp(result));
        });
        Ok(())
    }

    /// Wait for the next finished auth call
    ///
    /// Never resolves while nothing is in flight; meant for `select!`.
    pub async fn next_reply(&mut self) -> AuthReply {
        match self.replies_rx.recv().await {
            Some(reply) => reply,
            // We hold a sender, so the channel never closes
            None => std::future::pending().await,
        }
    }

    /// Record a successful sign-in
    pub fn signed_in(&mut self, session: &Session) {
        info!(user_id = %session.user.id, "Signed in");
        self.user = Some(session.user.clone());
    }

    /// Sign out, waiting at most the logout timeout for the backend
    ///
    /// The user and the backend token are cleared whatever the backend does.
    pub async fn sign_out(&mut self) -> SignOut {
        let outcome = match time::timeout(self.logout_timeout, self.backend.logout()).await {
            Ok(Ok(())) => SignOut::Confirmed,
            Ok(Err(e)) => {
                warn!(error = %e, "Backend logout failed, clearing local session anyway");
                SignOut::Failed(e.to_string())
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.logout_timeout.as_millis() as u64,
                    "Backend logout timed out, clearing local session anyway"
                );
                SignOut::TimedOut
            }
        };

        self.backend.set_access_token(None).await;
        self.user = None;
        info!(outcome = ?outcome, "Signed out");
        outcome
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("user", &self.user)
            .field("logout_timeout", &self.logout_timeout)
            .finish_non_exhaustive()
    }
}

/// Check the auth form fields
pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("メールアドレスとパスワードを入力してください".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "パスワードは{}文字以上で入力してください",
            MIN_PASSWORD_LEN
        ));
    }
    Ok(())
}

/// Display name derived from an e-mail address
pub fn default_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

fn form_error(error: &MoodError) -> String {
    match error {
        MoodError::Auth(msg) | MoodError::Backend(msg) | MoodError::InvalidInput(msg) => {
            msg.clone()
        }
        MoodError::Network(_) => "サーバーに接続できません".to_string(),
        other => other.to_string(),
    }
}
