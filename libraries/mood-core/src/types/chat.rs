/// Listen-together chat and presence records
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub room_id: String,
    pub user_name: String,
    pub message: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl ChatMessage {
    /// `HH:MM` of the creation time, empty when unknown
    pub fn time_label(&self) -> String {
        self.created_at
            .map(|at| at.format("%H:%M").to_string())
            .unwrap_or_default()
    }
}

/// Message about to be inserted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChatMessage {
    pub room_id: String,
    pub user_id: String,
    pub user_name: String,
    pub message: String,
}

/// Member state tracked on a presence channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceMember {
    pub user_id: String,
    pub user_name: String,
    pub mood: String,
    pub track_url: String,
}
