//! Mood Player - Playback Management
//!
//! Platform-agnostic playback management for Mood Player.
//!
//! This crate provides:
//! - Playlist sequencing over a mood's track list (sequential + shuffle)
//! - Repeat modes (Off, One, All) and the end-of-track policy
//! - Play history (append-only, in memory)
//! - Linear volume ramps for fade-in entries and crossfades
//! - Volume and mute handling
//! - A transport driving any `AudioElement` implementation
//!
//! # Architecture
//!
//! `mood-playback` knows nothing about browsers, terminals or rooms:
//! - The `Sequencer` decides *which* track comes next
//! - The `Transport` decides *how* the audio element moves to it
//! - The element itself (`<audio>`, a simulated clock, a test fake) is a trait
//!
//! # Example: Sequencing
//!
//! ```rust
//! use mood_core::{MoodKey, MoodTable, Track};
//! use mood_playback::{RepeatMode, Sequencer};
//! use rand::SeedableRng;
//!
//! let mut table = MoodTable::with_fallback(Track::new("f", "https://cdn.example.com/f.mp3"));
//! table.set_tracks(MoodKey::Relax, vec![
//!     Track::new("a", "https://cdn.example.com/a.mp3"),
//!     Track::new("b", "https://cdn.example.com/b.mp3"),
//! ]);
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let mut sequencer = Sequencer::new();
//! sequencer.select_mood(MoodKey::Relax);
//! sequencer.set_repeat(RepeatMode::All);
//!
//! let first = sequencer.pick_next(&table, &mut rng).unwrap();
//! assert_eq!(first.title, "a");
//! let second = sequencer.pick_next(&table, &mut rng).unwrap();
//! assert_eq!(second.title, "b");
//! assert_eq!(sequencer.history().len(), 2);
//! ```

mod audio;
mod crossfade;
mod error;
mod history;
mod sequencer;
mod transport;
pub mod types;
mod volume;

// Public exports
pub use audio::{AudioElement, AudioEvent};
pub use crossfade::{
    ramp_volume, VolumeRamp, CROSSFADE_IN, CROSSFADE_OUT, ENTRY_FADE_IN, FRAME_INTERVAL,
};
pub use error::{PlaybackError, Result};
pub use history::History;
pub use sequencer::{Sequencer, SHUFFLE_ATTEMPTS};
pub use transport::{LoadOutcome, Transport};
pub use types::{HistoryEntry, PickOptions, RepeatMode, TrackEnd, TransportState};
pub use volume::{format_time, Volume, VolumeIcon};
