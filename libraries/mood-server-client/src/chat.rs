//! Listen-together chat history.

use crate::client::{authorize, expect_success, read_json, send};
use crate::error::Result;
use crate::types::Listing;
use mood_core::{ChatMessage, NewChatMessage};
use reqwest::Client;
use tracing::debug;

/// Chat history client.
pub struct ChatClient<'a> {
    http: &'a Client,
    base_url: String,
    token: Option<String>,
}

impl<'a> ChatClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: String, token: Option<String>) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Messages of a room, oldest first.
    pub async fn messages(&self, room_id: &str) -> Result<Vec<ChatMessage>> {
        let url = format!("{}/api/chat/messages", self.base_url);
        debug!(url = %url, room_id = %room_id, "Loading chat messages");

        let request = authorize(
            self.http.get(&url).query(&[("room_id", room_id)]),
            self.token.as_deref(),
        );
        let listing: Listing<ChatMessage> = read_json(send(request).await?, "chat messages").await?;

        let mut messages = listing.into_vec();
        // Undated rows first, then ascending by time
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    /// Insert a message.
    pub async fn post(&self, message: &NewChatMessage) -> Result<()> {
        let url = format!("{}/api/chat/messages", self.base_url);
        debug!(url = %url, room_id = %message.room_id, "Posting chat message");

        let request = authorize(self.http.post(&url).json(message), self.token.as_deref());
        expect_success(send(request).await?).await
    }
}
