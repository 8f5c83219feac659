//! Mood Player Core
//!
//! Platform-agnostic core types, traits, and error handling for Mood Player.
//!
//! The core crate defines:
//! - **Domain Types**: `MoodKey`, `Mood`, `MoodTable`, `Track`, chat and social records
//! - **Backend Traits**: `Backend` (auth, social, chat persistence) and `Realtime`
//!   (presence channels, chat inserts)
//! - **Error Handling**: Unified `MoodError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use mood_core::{MoodKey, MoodTable, Track};
//!
//! let fallback = Track::new("Fallback", "https://cdn.example.com/fallback.mp3");
//! let table = MoodTable::with_fallback(fallback);
//!
//! let relax = table.get(MoodKey::Relax);
//! assert_eq!(relax.catalog_file, "chill.txt");
//! assert_eq!(relax.tracks.len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{MoodError, Result};
pub use traits::{Backend, ChatSubscription, PresenceSubscription, Realtime};

pub use types::{
    // Catalog
    Mood, MoodKey, MoodTable, ParticlePreset, Track,
    // Accounts and social
    FriendRequest, RegisterOutcome, Session, UserProfile, UserSummary,
    // Listen-together
    ChatMessage, NewChatMessage, PresenceMember,
};
