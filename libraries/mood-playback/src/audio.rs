//! Platform-agnostic audio element trait
//!
//! Abstracts whatever actually produces sound (`<audio>` in a browser, a
//! simulated clock in the terminal player, a recorder in tests).

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Audio element driven by the transport
///
/// Volume is linear in `0.0..=1.0`. Implementations report playback events
/// (`AudioEvent`) to the controller through their own channel.
#[async_trait]
pub trait AudioElement: Send {
    /// Assign a new source; the element is paused afterwards
    fn set_source(&mut self, url: &str);

    /// Currently assigned source
    fn source(&self) -> Option<&str>;

    /// Start or resume playback
    ///
    /// # Returns
    /// * `Ok(())` - Playback started
    /// * `Err(PlaybackError::PlaybackRejected)` - The environment refused (autoplay policy, no source, ...)
    async fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Check if paused
    fn is_paused(&self) -> bool;

    /// Current playback position
    fn position(&self) -> Duration;

    /// Move the playback position
    fn set_position(&mut self, position: Duration);

    /// Track duration, `None` until the source metadata is known
    fn duration(&self) -> Option<Duration>;

    /// Current volume
    fn volume(&self) -> f32;

    /// Set volume (clamped by the caller to `0.0..=1.0`)
    fn set_volume(&mut self, volume: f32);
}

/// Events reported by an audio element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioEvent {
    /// Position or duration changed
    TimeUpdate {
        position: Duration,
        duration: Option<Duration>,
    },

    /// Playback reached the end of the source
    Ended,

    /// Source failed to load or decode
    Error,
}
