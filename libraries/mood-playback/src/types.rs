//! Core types for playback management

use chrono::{DateTime, Utc};
use mood_core::MoodKey;
use serde::{Deserialize, Serialize};

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop after the last track of the list
    #[default]
    Off,

    /// Loop current track only
    One,

    /// Loop the whole list
    All,
}

impl RepeatMode {
    /// Next mode in the button cycle: off -> one -> all -> off
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::One,
            RepeatMode::One => RepeatMode::All,
            RepeatMode::All => RepeatMode::Off,
        }
    }

    /// Tooltip for the repeat button
    pub fn label(self) -> &'static str {
        match self {
            RepeatMode::Off => "循环关闭",
            RepeatMode::One => "单曲循环",
            RepeatMode::All => "列表循环",
        }
    }
}

/// How a picked track should be brought in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickOptions {
    /// Start playing right away
    pub autoplay: bool,

    /// Entry fade: start silent and ramp up slowly, no crossfade
    pub fade_in: bool,
}

impl PickOptions {
    /// Entering a mood: autoplay with a slow fade-in
    pub const ENTRY: PickOptions = PickOptions {
        autoplay: true,
        fade_in: true,
    };

    /// Manual skip: autoplay, crossfade when something is playing
    pub const SKIP: PickOptions = PickOptions {
        autoplay: true,
        fade_in: false,
    };
}

/// Transport state as reported by the audio element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    /// No source assigned
    Idle,

    /// Source assigned, never started
    Loaded,

    /// Currently playing
    Playing,

    /// Paused after having played
    Paused,
}

/// What happens when the current track plays to its end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackEnd {
    /// Restart the same track from position zero
    RestartCurrent,

    /// Move on to the next pick (with entry fade)
    Advance,

    /// Stop: last track of the list with repeat off
    Stop,
}

/// One entry of the play history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub mood: MoodKey,
    pub url: String,
    pub at: DateTime<Utc>,
}
