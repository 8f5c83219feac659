//! Transport: moves an audio element between tracks
//!
//! Owns the audio element and applies the fade rules:
//! - Entry (fade-in): start silent, ramp up over `ENTRY_FADE_IN`
//! - Skip while playing: crossfade (`CROSSFADE_OUT` then `CROSSFADE_IN`)
//! - Anything else: hard cut at full volume

use crate::audio::AudioElement;
use crate::crossfade::{ramp_volume, VolumeRamp};
use crate::types::{PickOptions, TransportState};
use crate::volume::Volume;
use mood_core::Track;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of loading a track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Source assigned, autoplay not requested
    Loaded,

    /// Playback started
    Playing,

    /// Autoplay was refused; element stays paused at full volume
    Blocked,
}

impl LoadOutcome {
    /// Whether the play indicator should be on
    pub fn is_playing(self) -> bool {
        self == LoadOutcome::Playing
    }
}

/// Audio transport
pub struct Transport {
    audio: Box<dyn AudioElement>,
    volume: Volume,
    reduced_motion: bool,
    has_started: bool,
    pending_fade: Option<VolumeRamp>,
}

impl Transport {
    /// Wrap an audio element
    pub fn new(audio: Box<dyn AudioElement>, reduced_motion: bool) -> Self {
        Self {
            audio,
            volume: Volume::new(),
            reduced_motion,
            has_started: false,
            pending_fade: None,
        }
    }

    /// Whether ramps are skipped
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Current transport state
    pub fn state(&self) -> TransportState {
        if self.audio.source().is_none() {
            TransportState::Idle
        } else if !self.audio.is_paused() {
            TransportState::Playing
        } else if self.has_started {
            TransportState::Paused
        } else {
            TransportState::Loaded
        }
    }

    /// Check if audio is playing
    pub fn is_playing(&self) -> bool {
        !self.audio.is_paused()
    }

    /// Whether moving to another track with `options` crossfades
    pub fn will_crossfade(&self, options: PickOptions) -> bool {
        !options.fade_in && self.is_playing() && !self.reduced_motion
    }

    /// Ramp the outgoing track down before a crossfade swap
    pub async fn fade_out(&mut self) {
        debug!("Crossfade out");
        ramp_volume(self.audio.as_mut(), VolumeRamp::crossfade_out(), self.reduced_motion).await;
    }

    /// Assign `track` and optionally start it
    ///
    /// `crossfading` marks the second half of a crossfade: the track starts
    /// silent and `settle` ramps it in. Playback refusal is not an error; the
    /// element falls back to paused at full volume.
    pub async fn load(&mut self, track: &Track, options: PickOptions, crossfading: bool) -> LoadOutcome {
        self.pending_fade = None;
        self.audio.set_source(&track.url);
        self.audio.set_position(Duration::ZERO);
        self.has_started = false;

        if !options.autoplay {
            debug!(url = %track.url, "Track loaded");
            return LoadOutcome::Loaded;
        }

        let silent = options.fade_in || crossfading;
        self.audio.set_volume(if silent { 0.0 } else { 1.0 });

        match self.audio.play().await {
            Ok(()) => {
                self.has_started = true;
                if options.fade_in {
                    self.pending_fade = Some(VolumeRamp::entry());
                } else if crossfading {
                    self.pending_fade = Some(VolumeRamp::crossfade_in());
                }
                info!(url = %track.url, title = %track.title, "Playing");
                LoadOutcome::Playing
            }
            Err(e) => {
                warn!(url = %track.url, error = %e, "Autoplay refused, staying paused");
                self.audio.set_volume(1.0);
                LoadOutcome::Blocked
            }
        }
    }

    /// Run the fade-in scheduled by the last `load`, if any
    pub async fn settle(&mut self) {
        if let Some(ramp) = self.pending_fade.take() {
            ramp_volume(self.audio.as_mut(), ramp, self.reduced_motion).await;
        }
    }

    /// Toggle between playing and paused
    ///
    /// Returns whether audio is playing afterwards.
    pub async fn toggle_play(&mut self) -> bool {
        if !self.audio.is_paused() {
            self.audio.pause();
            debug!("Paused");
            return false;
        }

        let current = self.audio.volume();
        self.audio.set_volume(Volume::resume_level(current));
        self.resume().await
    }

    /// Restart the current source from position zero and play
    pub async fn restart(&mut self) -> bool {
        self.audio.set_position(Duration::ZERO);
        self.resume().await
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.pending_fade = None;
        self.audio.pause();
    }

    /// Seek to a fraction (0.0 to 1.0) of the duration
    ///
    /// Ignored while the duration is unknown.
    pub fn seek_fraction(&mut self, fraction: f64) {
        let Some(duration) = self.audio.duration().filter(|d| !d.is_zero()) else {
            debug!("Seek ignored, duration unknown");
            return;
        };

        let target = duration.mul_f64(fraction.clamp(0.0, 1.0));
        self.audio.set_position(target);
    }

    /// Current volume
    pub fn volume(&self) -> f32 {
        self.audio.volume()
    }

    /// Set volume (clamped to 0.0..=1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.audio.set_volume(volume.clamp(0.0, 1.0));
    }

    /// Mute button: mute remembering the level, or restore it
    ///
    /// Returns the new volume.
    pub fn toggle_mute(&mut self) -> f32 {
        let next = self.volume.toggle(self.audio.volume());
        self.audio.set_volume(next);
        next
    }

    /// Current position
    pub fn position(&self) -> Duration {
        self.audio.position()
    }

    /// Track duration if known
    pub fn duration(&self) -> Option<Duration> {
        self.audio.duration()
    }

    async fn resume(&mut self) -> bool {
        match self.audio.play().await {
            Ok(()) => {
                self.has_started = true;
                true
            }
            Err(e) => {
                warn!(error = %e, "Play refused");
                false
            }
        }
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("state", &self.state())
            .field("volume", &self.audio.volume())
            .field("reduced_motion", &self.reduced_motion)
            .finish_non_exhaustive()
    }
}
