/// Core traits for Mood Player
///
/// Everything the player needs from the hosted backend goes through these two
/// traits, so the controller can be driven by an HTTP implementation in
/// production and by in-memory fakes in tests.
use crate::error::Result;
use crate::types::{
    ChatMessage, FriendRequest, NewChatMessage, PresenceMember, RegisterOutcome, Session,
    UserProfile, UserSummary,
};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Request/response backend: accounts, social graph and chat history
#[async_trait]
pub trait Backend: Send + Sync {
    /// Create an account
    async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<RegisterOutcome>;

    /// Log in and start using the returned bearer token
    async fn login(&self, email: &str, password: &str) -> Result<Session>;

    /// Invalidate the session server-side
    ///
    /// The local token is dropped whatever the server answers.
    async fn logout(&self) -> Result<()>;

    /// Install (or clear) a bearer token restored from client storage
    async fn set_access_token(&self, token: Option<String>);

    /// User behind the current token, `None` when signed out
    async fn current_user(&self) -> Result<Option<UserProfile>>;

    /// Search other users by name or e-mail
    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>>;

    /// Send a friend request
    async fn send_friend_request(&self, to_user_id: &str) -> Result<()>;

    /// Incoming friend requests
    async fn friend_requests(&self) -> Result<Vec<FriendRequest>>;

    /// Accept an incoming friend request
    async fn accept_friend_request(&self, request_id: &str) -> Result<()>;

    /// Reject an incoming friend request
    async fn reject_friend_request(&self, request_id: &str) -> Result<()>;

    /// Current friends
    async fn friends(&self) -> Result<Vec<UserSummary>>;

    /// Remove a friend
    async fn delete_friend(&self, friend_id: &str) -> Result<()>;

    /// Chat history of a room, oldest first
    async fn chat_messages(&self, room_id: &str) -> Result<Vec<ChatMessage>>;

    /// Insert a chat message
    async fn post_chat_message(&self, message: &NewChatMessage) -> Result<()>;
}

/// Realtime backend: presence channels and row-insert subscriptions
#[async_trait]
pub trait Realtime: Send + Sync {
    /// Subscribe to a presence channel and track `member` on it
    ///
    /// Resolves once the channel is subscribed; the returned subscription
    /// yields the participant count on every presence sync.
    async fn join_presence(
        &self,
        channel: &str,
        member: PresenceMember,
    ) -> Result<PresenceSubscription>;

    /// Subscribe to messages inserted into a chat room
    async fn subscribe_chat(&self, room_id: &str) -> Result<ChatSubscription>;
}

/// Live presence subscription
///
/// Dropping it unsubscribes from the channel.
pub struct PresenceSubscription {
    counts: mpsc::UnboundedReceiver<usize>,
    _guard: Box<dyn Send + Sync>,
}

impl PresenceSubscription {
    /// Wrap a count stream; `guard` is dropped (and so releases the channel)
    /// together with the subscription
    pub fn new(counts: mpsc::UnboundedReceiver<usize>, guard: impl Send + Sync + 'static) -> Self {
        Self {
            counts,
            _guard: Box::new(guard),
        }
    }

    /// Next participant count; `None` once the channel closed
    pub async fn next_count(&mut self) -> Option<usize> {
        self.counts.recv().await
    }
}

impl std::fmt::Debug for PresenceSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceSubscription").finish_non_exhaustive()
    }
}

/// Live subscription to chat inserts of one room
///
/// Dropping it unsubscribes.
pub struct ChatSubscription {
    messages: mpsc::UnboundedReceiver<ChatMessage>,
    _guard: Box<dyn Send + Sync>,
}

impl ChatSubscription {
    /// Wrap a message stream; `guard` is dropped together with the subscription
    pub fn new(
        messages: mpsc::UnboundedReceiver<ChatMessage>,
        guard: impl Send + Sync + 'static,
    ) -> Self {
        Self {
            messages,
            _guard: Box::new(guard),
        }
    }

    /// Next inserted message; `None` once the subscription closed
    pub async fn next_message(&mut self) -> Option<ChatMessage> {
        self.messages.recv().await
    }
}

impl std::fmt::Debug for ChatSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSubscription").finish_non_exhaustive()
    }
}
