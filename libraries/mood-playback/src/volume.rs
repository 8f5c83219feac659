//! Volume, mute and time display helpers

use std::time::Duration;

/// Below this volume a resumed play restores full volume
const AUDIBLE_FLOOR: f32 = 0.1;

/// Volume memory for mute/unmute
///
/// The element's own volume is the source of truth; this only remembers
/// what to go back to when unmuting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    before_mute: f32,
}

impl Default for Volume {
    fn default() -> Self {
        Self { before_mute: 1.0 }
    }
}

impl Volume {
    /// Create with the default pre-mute volume (1.0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Volume restored on unmute
    pub fn before_mute(&self) -> f32 {
        self.before_mute
    }

    /// Volume to apply when the mute button is pressed at `current`
    ///
    /// Muting remembers `current`; unmuting restores the remembered level.
    pub fn toggle(&mut self, current: f32) -> f32 {
        if current > 0.0 {
            self.before_mute = current;
            0.0
        } else if self.before_mute > 0.0 {
            self.before_mute
        } else {
            1.0
        }
    }

    /// Volume to apply before resuming playback from `current`
    pub fn resume_level(current: f32) -> f32 {
        if current < AUDIBLE_FLOOR {
            1.0
        } else {
            current
        }
    }

    /// Convert a slider percentage (0-100) to a linear volume
    pub fn from_percent(percent: u8) -> f32 {
        f32::from(percent.min(100)) / 100.0
    }

    /// Convert a linear volume to a slider percentage (0-100)
    pub fn to_percent(volume: f32) -> u8 {
        // clamp keeps the cast in range
        (volume.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

/// Icon shown next to the volume slider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeIcon {
    Muted,
    Low,
    High,
}

impl VolumeIcon {
    /// Icon for a linear volume
    pub fn for_volume(volume: f32) -> Self {
        if volume <= 0.0 {
            VolumeIcon::Muted
        } else if volume < 0.5 {
            VolumeIcon::Low
        } else {
            VolumeIcon::High
        }
    }
}

/// Format a playback time as `m:ss`
///
/// Unknown (`None`) times render as `0:00`.
pub fn format_time(time: Option<Duration>) -> String {
    let secs = time.map_or(0, |t| t.as_secs());
    format!("{}:{:02}", secs / 60, secs % 60)
}
