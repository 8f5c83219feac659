mod chat;
mod mood;
mod track;
mod user;

pub use chat::{ChatMessage, NewChatMessage, PresenceMember};
pub use mood::{Mood, MoodKey, MoodTable, ParticlePreset};
pub use track::Track;
pub use user::{FriendRequest, RegisterOutcome, Session, UserProfile, UserSummary};
