//! Mood Player
//!
//! Pick a mood, get a track list and a tinted particle background, and
//! listen together with whoever is on the same track.
//!
//! This crate holds the controller (`MoodPlayer`) and everything around it:
//! URL routing, keyboard shortcuts, persisted preferences, accounts, chat,
//! the social layer and a terminal front-end.
//!
//! # Example
//!
//! ```rust
//! use mood_core::MoodKey;
//! use mood_player::router::Router;
//!
//! let mut router = Router::new("http://localhost:3000/").unwrap();
//! router.set_mood(MoodKey::Relax);
//! assert_eq!(router.url().as_str(), "http://localhost:3000/?mood=relax#relax");
//! assert_eq!(router.mood(), Some(MoodKey::Relax));
//! ```

pub mod app;
pub mod chat;
pub mod config;
pub mod error;
pub mod keys;
pub mod prefs;
pub mod router;
pub mod session;
pub mod simulated;
pub mod social;
pub mod terminal;
pub mod view;

pub use app::{AppState, Command, Input, MoodPlayer, PlayerOptions, PlayerServices};
pub use config::PlayerConfig;
pub use error::{PlayerError, Result};
pub use view::{AuthTab, Screen, View, ViewEvent};
