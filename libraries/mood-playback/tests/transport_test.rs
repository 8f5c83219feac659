//! Transport tests against a recording audio element
//!
//! Time is paused so fade ramps complete instantly and deterministically.

use async_trait::async_trait;
use mood_core::Track;
use mood_playback::{
    AudioElement, LoadOutcome, PickOptions, PlaybackError, Transport, TransportState,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ===== Helpers =====

#[derive(Debug, Default)]
struct Recorded {
    source: Option<String>,
    paused: bool,
    position: Duration,
    duration: Option<Duration>,
    volume: f32,
    volumes: Vec<f32>,
    refuse_play: bool,
    plays: usize,
}

#[derive(Clone)]
struct RecordingAudio(Arc<Mutex<Recorded>>);

impl RecordingAudio {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(Recorded {
            paused: true,
            volume: 1.0,
            ..Recorded::default()
        })))
    }

    fn state(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.0.lock().unwrap()
    }
}

#[async_trait]
impl AudioElement for RecordingAudio {
    fn set_source(&mut self, url: &str) {
        let mut state = self.state();
        state.source = Some(url.to_string());
        state.paused = true;
        state.duration = Some(Duration::from_secs(200));
    }

    fn source(&self) -> Option<&str> {
        // Only presence matters to the transport
        if self.state().source.is_some() {
            Some("set")
        } else {
            None
        }
    }

    async fn play(&mut self) -> Result<(), PlaybackError> {
        let mut state = self.state();
        if state.refuse_play {
            return Err(PlaybackError::PlaybackRejected("autoplay blocked".into()));
        }
        state.paused = false;
        state.plays += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.state().paused = true;
    }

    fn is_paused(&self) -> bool {
        self.state().paused
    }

    fn position(&self) -> Duration {
        self.state().position
    }

    fn set_position(&mut self, position: Duration) {
        self.state().position = position;
    }

    fn duration(&self) -> Option<Duration> {
        self.state().duration
    }

    fn volume(&self) -> f32 {
        self.state().volume
    }

    fn set_volume(&mut self, volume: f32) {
        let mut state = self.state();
        state.volume = volume;
        state.volumes.push(volume);
    }
}

fn track(name: &str) -> Track {
    Track::new(name, format!("https://cdn.example.com/{name}.mp3"))
}

fn is_monotonic(values: &[f32], rising: bool) -> bool {
    values
        .windows(2)
        .all(|w| if rising { w[0] <= w[1] } else { w[0] >= w[1] })
}

// ===== Tests =====

#[tokio::test(start_paused = true)]
async fn entry_load_fades_in_from_silence() {
    let audio = RecordingAudio::new();
    let mut transport = Transport::new(Box::new(audio.clone()), false);

    let outcome = transport.load(&track("a"), PickOptions::ENTRY, false).await;
    assert_eq!(outcome, LoadOutcome::Playing);
    assert_eq!(audio.state().volume, 0.0);

    transport.settle().await;

    let state = audio.state();
    assert_eq!(state.volume, 1.0);
    assert_eq!(state.volumes[0], 0.0);
    assert!(state.volumes.len() > 10, "ramp should have many steps");
    assert!(is_monotonic(&state.volumes, true));
    drop(state);
    assert_eq!(transport.state(), TransportState::Playing);
}

#[tokio::test(start_paused = true)]
async fn entry_fade_takes_680ms() {
    let audio = RecordingAudio::new();
    let mut transport = Transport::new(Box::new(audio.clone()), false);

    transport.load(&track("a"), PickOptions::ENTRY, false).await;
    let start = tokio::time::Instant::now();
    transport.settle().await;
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_millis(680));
    assert!(elapsed < Duration::from_millis(720));
}

#[tokio::test(start_paused = true)]
async fn crossfade_goes_down_then_up() {
    let audio = RecordingAudio::new();
    let mut transport = Transport::new(Box::new(audio.clone()), false);

    transport.load(&track("a"), PickOptions::SKIP, false).await;
    assert!(transport.is_playing());
    assert!(transport.will_crossfade(PickOptions::SKIP));
    assert!(!transport.will_crossfade(PickOptions::ENTRY));

    audio.state().volumes.clear();
    let start = tokio::time::Instant::now();
    transport.fade_out().await;
    let out_elapsed = start.elapsed();
    assert_eq!(audio.state().volume, 0.0);
    assert!(out_elapsed >= Duration::from_millis(180));

    let fade_out: Vec<f32> = audio.state().volumes.drain(..).collect();
    assert_eq!(fade_out[0], 1.0);
    assert!(is_monotonic(&fade_out, false));

    let outcome = transport.load(&track("b"), PickOptions::SKIP, true).await;
    assert_eq!(outcome, LoadOutcome::Playing);
    assert_eq!(audio.state().volume, 0.0);

    transport.settle().await;
    let fade_in: Vec<f32> = audio.state().volumes.clone();
    assert!(is_monotonic(&fade_in, true));
    assert_eq!(audio.state().volume, 1.0);
}

#[tokio::test(start_paused = true)]
async fn reduced_motion_skips_ramps() {
    let audio = RecordingAudio::new();
    let mut transport = Transport::new(Box::new(audio.clone()), true);

    transport.load(&track("a"), PickOptions::ENTRY, false).await;
    transport.settle().await;
    assert_eq!(audio.state().volumes, vec![0.0, 1.0]);

    // Reduced motion never crossfades
    assert!(!transport.will_crossfade(PickOptions::SKIP));
}

#[tokio::test(start_paused = true)]
async fn refused_autoplay_stays_paused_at_full_volume() {
    let audio = RecordingAudio::new();
    audio.state().refuse_play = true;
    let mut transport = Transport::new(Box::new(audio.clone()), false);

    let outcome = transport.load(&track("a"), PickOptions::ENTRY, false).await;
    assert_eq!(outcome, LoadOutcome::Blocked);
    assert!(!outcome.is_playing());

    transport.settle().await;
    let state = audio.state();
    assert!(state.paused);
    assert_eq!(state.volume, 1.0);
    drop(state);
    assert_eq!(transport.state(), TransportState::Loaded);
}

#[tokio::test]
async fn load_without_autoplay_only_assigns() {
    let audio = RecordingAudio::new();
    audio.state().position = Duration::from_secs(42);
    let mut transport = Transport::new(Box::new(audio.clone()), false);
    assert_eq!(transport.state(), TransportState::Idle);

    let outcome = transport
        .load(
            &track("a"),
            PickOptions {
                autoplay: false,
                fade_in: false,
            },
            false,
        )
        .await;

    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(audio.state().plays, 0);
    assert_eq!(audio.state().position, Duration::ZERO);
    assert_eq!(transport.state(), TransportState::Loaded);
}

#[tokio::test]
async fn toggle_play_restores_inaudible_volume() {
    let audio = RecordingAudio::new();
    let mut transport = Transport::new(Box::new(audio.clone()), false);
    transport.load(&track("a"), PickOptions::SKIP, false).await;

    assert!(!transport.toggle_play().await);
    assert_eq!(transport.state(), TransportState::Paused);

    transport.set_volume(0.05);
    assert!(transport.toggle_play().await);
    assert_eq!(transport.volume(), 1.0);

    transport.toggle_play().await;
    transport.set_volume(0.3);
    assert!(transport.toggle_play().await);
    assert_eq!(transport.volume(), 0.3);
}

#[tokio::test]
async fn restart_rewinds_and_plays() {
    let audio = RecordingAudio::new();
    let mut transport = Transport::new(Box::new(audio.clone()), false);
    transport.load(&track("a"), PickOptions::SKIP, false).await;

    audio.state().position = Duration::from_secs(199);
    audio.state().paused = true;

    assert!(transport.restart().await);
    assert_eq!(transport.position(), Duration::ZERO);
    assert!(transport.is_playing());
}

#[tokio::test]
async fn seek_uses_fraction_of_duration() {
    let audio = RecordingAudio::new();
    let mut transport = Transport::new(Box::new(audio.clone()), false);

    // No duration yet
    transport.seek_fraction(0.5);
    assert_eq!(transport.position(), Duration::ZERO);

    transport.load(&track("a"), PickOptions::SKIP, false).await;
    transport.seek_fraction(0.25);
    assert_eq!(transport.position(), Duration::from_secs(50));

    transport.seek_fraction(3.0);
    assert_eq!(transport.position(), Duration::from_secs(200));
}

#[tokio::test]
async fn mute_round_trip() {
    let audio = RecordingAudio::new();
    let mut transport = Transport::new(Box::new(audio.clone()), false);

    transport.set_volume(0.7);
    assert_eq!(transport.toggle_mute(), 0.0);
    assert_eq!(transport.volume(), 0.0);
    assert_eq!(transport.toggle_mute(), 0.7);
    assert_eq!(transport.volume(), 0.7);
}
