//! Playback history tracking
//!
//! Append-only log of every pick, kept in memory for the session

use crate::types::HistoryEntry;
use chrono::Utc;
use mood_core::MoodKey;

/// Play history
///
/// Unbounded and never persisted. Most recent entry is last.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Create empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pick at the current time
    pub fn record(&mut self, mood: MoodKey, url: &str) {
        self.entries.push(HistoryEntry {
            mood,
            url: url.to_string(),
            at: Utc::now(),
        });
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
