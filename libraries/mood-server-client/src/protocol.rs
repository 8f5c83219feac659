//! Realtime websocket frames
//!
//! Every frame is a JSON text message tagged by `type`. One connection
//! carries one channel: a presence channel (`room:<id>`) or a chat insert
//! channel (`chat:<id>`).

use mood_core::{ChatMessage, PresenceMember};
use serde::{Deserialize, Serialize};

/// Frames sent by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    /// Subscribe to a presence channel and track `member` on it
    Join {
        channel: String,
        member: PresenceMember,
    },

    /// Subscribe to chat inserts for `room_id`
    Subscribe { channel: String, room_id: String },

    /// Leave the channel before closing
    Leave { channel: String },
}

/// Frames sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    /// Presence join acknowledged
    Joined { channel: String },

    /// Chat subscription acknowledged
    Subscribed { channel: String },

    /// Presence sync with the current participant count
    Presence { channel: String, count: usize },

    /// A chat row was inserted
    Insert { channel: String, record: ChatMessage },

    /// Channel error
    Error {
        #[serde(default)]
        channel: Option<String>,
        message: String,
    },

    /// Anything this client does not understand
    #[serde(other)]
    Unknown,
}

impl ServerFrame {
    /// Channel a frame belongs to, when it names one
    pub fn channel(&self) -> Option<&str> {
        match self {
            ServerFrame::Joined { channel }
            | ServerFrame::Subscribed { channel }
            | ServerFrame::Presence { channel, .. }
            | ServerFrame::Insert { channel, .. } => Some(channel),
            ServerFrame::Error { channel, .. } => channel.as_deref(),
            ServerFrame::Unknown => None,
        }
    }
}
