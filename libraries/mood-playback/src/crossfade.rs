//! Volume ramps for fade-in entries and crossfades
//!
//! All ramps are linear in volume and run at display cadence on the caller's
//! task. Reduced motion skips interpolation entirely.

use crate::audio::AudioElement;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

/// Fade-out of the outgoing track during a crossfade
pub const CROSSFADE_OUT: Duration = Duration::from_millis(180);

/// Fade-in of the incoming track during a crossfade
pub const CROSSFADE_IN: Duration = Duration::from_millis(220);

/// Fade-in when entering a mood or auto-advancing
pub const ENTRY_FADE_IN: Duration = Duration::from_millis(680);

/// Step between ramp updates (about 60 Hz)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// A linear volume ramp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeRamp {
    pub from: f32,
    pub to: f32,
    pub duration: Duration,
}

impl VolumeRamp {
    /// Create a ramp
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    /// Outgoing half of a crossfade
    pub fn crossfade_out() -> Self {
        Self::new(1.0, 0.0, CROSSFADE_OUT)
    }

    /// Incoming half of a crossfade
    pub fn crossfade_in() -> Self {
        Self::new(0.0, 1.0, CROSSFADE_IN)
    }

    /// Slow entry fade
    pub fn entry() -> Self {
        Self::new(0.0, 1.0, ENTRY_FADE_IN)
    }

    /// Fraction of the ramp completed after `elapsed` (0.0 to 1.0)
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Volume at a given progress, clamped to `0.0..=1.0`
    #[inline]
    pub fn volume_at(&self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);
        (self.from + (self.to - self.from) * t).clamp(0.0, 1.0)
    }
}

/// Run a ramp against an audio element
///
/// With `reduced_motion` the target volume is set at once.
pub async fn ramp_volume(audio: &mut dyn AudioElement, ramp: VolumeRamp, reduced_motion: bool) {
    if reduced_motion || ramp.duration.is_zero() {
        audio.set_volume(ramp.volume_at(1.0));
        return;
    }

    audio.set_volume(ramp.volume_at(0.0));

    let start = Instant::now();
    let mut ticker = time::interval(FRAME_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let progress = ramp.progress(start.elapsed());
        audio.set_volume(ramp.volume_at(progress));
        if progress >= 1.0 {
            break;
        }
    }

    trace!(from = ramp.from, to = ramp.to, ms = ramp.duration.as_millis() as u64, "Ramp finished");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_endpoints() {
        let ramp = VolumeRamp::crossfade_out();
        assert_eq!(ramp.volume_at(0.0), 1.0);
        assert_eq!(ramp.volume_at(1.0), 0.0);
        assert!((ramp.volume_at(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn progress_saturates() {
        let ramp = VolumeRamp::entry();
        assert_eq!(ramp.progress(Duration::ZERO), 0.0);
        assert!((ramp.progress(Duration::from_millis(340)) - 0.5).abs() < 1e-3);
        assert_eq!(ramp.progress(Duration::from_secs(5)), 1.0);
    }

    #[test]
    fn zero_duration_is_complete() {
        let ramp = VolumeRamp::new(0.0, 1.0, Duration::ZERO);
        assert_eq!(ramp.progress(Duration::ZERO), 1.0);
    }

    #[test]
    fn volume_is_clamped() {
        let ramp = VolumeRamp::new(-1.0, 2.0, CROSSFADE_IN);
        assert_eq!(ramp.volume_at(0.0), 0.0);
        assert_eq!(ramp.volume_at(1.0), 1.0);
        assert_eq!(ramp.volume_at(7.0), 1.0);
    }

    #[test]
    fn durations() {
        assert_eq!(CROSSFADE_OUT.as_millis(), 180);
        assert_eq!(CROSSFADE_IN.as_millis(), 220);
        assert_eq!(ENTRY_FADE_IN.as_millis(), 680);
    }
}
