//! Mood/track selection with shuffle and repeat
//!
//! The sequencer owns the selection half of the playback state: current mood,
//! current track, history, repeat mode and shuffle flag. It never touches the
//! audio element; the caller hands picked tracks to a `Transport`.

use crate::history::History;
use crate::types::{RepeatMode, TrackEnd};
use mood_core::{Mood, MoodKey, MoodTable, Track};
use rand::Rng;
use tracing::{debug, trace};

/// Random draws made while avoiding the current track in shuffle mode
pub const SHUFFLE_ATTEMPTS: usize = 8;

/// Playlist sequencer
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    mood: Option<MoodKey>,
    current: Option<Track>,
    history: History,
    repeat: RepeatMode,
    shuffle: bool,
}

impl Sequencer {
    /// Create a sequencer with no mood selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to a mood
    ///
    /// Clears the current track; the caller picks the first track of the new
    /// mood right after.
    pub fn select_mood(&mut self, key: MoodKey) {
        debug!(mood = %key, "Mood selected");
        self.mood = Some(key);
        self.current = None;
    }

    /// Forget mood and track (back to the pick screen)
    pub fn clear(&mut self) {
        self.mood = None;
        self.current = None;
    }

    /// Currently selected mood
    pub fn mood(&self) -> Option<MoodKey> {
        self.mood
    }

    /// Currently loaded track
    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// Play history
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Set repeat mode
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
    }

    /// Advance the repeat mode one step and return the new mode
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.cycle();
        self.repeat
    }

    /// Whether shuffle is on
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Flip shuffle and return the new flag
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.shuffle
    }

    /// Drop the current track if the mood's list no longer contains it
    ///
    /// Called after a catalog replaces the list the current track came from.
    pub fn reconcile(&mut self, table: &MoodTable) {
        let Some(mood) = self.mood else {
            return;
        };

        if let Some(current) = &self.current {
            if !table.get(mood).contains(&current.url) {
                debug!(mood = %mood, url = %current.url, "Current track left the list");
                self.current = None;
            }
        }
    }

    /// Pick the next track of the current mood
    ///
    /// Shuffle avoids the current URL for up to `SHUFFLE_ATTEMPTS` draws and
    /// then falls back to the next sequential track. Returns `None` only when
    /// no mood is selected.
    pub fn pick_next<R: Rng + ?Sized>(&mut self, table: &MoodTable, rng: &mut R) -> Option<Track> {
        let mood = table.get(self.mood?);
        let index = self.next_index(mood, rng)?;
        Some(self.take(mood, index))
    }

    /// Manual skip forward; same selection rule as `pick_next`
    pub fn advance<R: Rng + ?Sized>(&mut self, table: &MoodTable, rng: &mut R) -> Option<Track> {
        self.pick_next(table, rng)
    }

    /// Manual skip back, always sequential
    pub fn retreat(&mut self, table: &MoodTable) -> Option<Track> {
        let mood = table.get(self.mood?);
        let len = mood.tracks.len();
        if len == 0 {
            return None;
        }

        let index = match self.current_index(mood) {
            Some(index) if index > 0 => index - 1,
            _ => len - 1,
        };
        Some(self.take(mood, index))
    }

    /// Select a track by its position in the current mood's list
    pub fn jump_to(&mut self, table: &MoodTable, index: usize) -> Option<Track> {
        let mood = table.get(self.mood?);
        if index >= mood.tracks.len() {
            return None;
        }
        Some(self.take(mood, index))
    }

    /// Decide what happens when the current track ends
    ///
    /// "Last track" is judged in list order, also while shuffling.
    pub fn end_of_track(&self, table: &MoodTable) -> TrackEnd {
        match self.repeat {
            RepeatMode::One if self.current.is_some() => TrackEnd::RestartCurrent,
            RepeatMode::One | RepeatMode::All => TrackEnd::Advance,
            RepeatMode::Off => {
                let Some(mood) = self.mood.map(|key| table.get(key)) else {
                    return TrackEnd::Stop;
                };
                let len = mood.tracks.len();
                match self.current_index(mood) {
                    Some(index) if len > 0 && index == len - 1 => TrackEnd::Stop,
                    _ => TrackEnd::Advance,
                }
            }
        }
    }

    fn current_index(&self, mood: &Mood) -> Option<usize> {
        self.current.as_ref().and_then(|t| mood.index_of(&t.url))
    }

    fn next_index<R: Rng + ?Sized>(&self, mood: &Mood, rng: &mut R) -> Option<usize> {
        let len = mood.tracks.len();
        match len {
            0 => return None,
            1 => return Some(0),
            _ => {}
        }

        let current_url = self.current.as_ref().map(|t| t.url.as_str());

        if self.shuffle {
            for attempt in 0..SHUFFLE_ATTEMPTS {
                let candidate = rng.gen_range(0..len);
                if Some(mood.tracks[candidate].url.as_str()) != current_url {
                    trace!(attempt, candidate, "Shuffle draw accepted");
                    return Some(candidate);
                }
            }
            debug!(mood = %mood.key, "Shuffle draws all hit the current track, going sequential");
        }

        Some(match self.current_index(mood) {
            Some(index) => (index + 1) % len,
            None => 0,
        })
    }

    fn take(&mut self, mood: &Mood, index: usize) -> Track {
        let track = mood.tracks[index].clone();
        self.history.record(mood.key, &track.url);
        self.current = Some(track.clone());
        debug!(mood = %mood.key, index, url = %track.url, "Track picked");
        track
    }
}
