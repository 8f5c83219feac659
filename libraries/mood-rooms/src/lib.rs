//! Mood Player - Listen-together rooms
//!
//! Everyone listening to the same track of the same mood lands in the same
//! room. A room is a presence channel on the realtime backend; chat opens up
//! once at least two people are present.
//!
//! # Example
//!
//! ```rust
//! use mood_core::MoodKey;
//! use mood_rooms::{presence_channel, room_id};
//!
//! let id = room_id(MoodKey::Relax, "https://cdn.example.com/a.mp3");
//! assert_eq!(id, "r_yyjb4b");
//! assert_eq!(presence_channel(&id), "room:r_yyjb4b");
//! ```

mod membership;
mod room_id;

pub use membership::{RoomEvent, RoomMembership, RoomStatus, RoomUpdate, DEFAULT_JOIN_TIMEOUT};
pub use room_id::{chat_channel, presence_channel, room_id, MIN_CHAT_PARTICIPANTS};
