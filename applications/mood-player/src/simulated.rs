//! Simulated audio element
//!
//! The terminal player has no audio output. This element keeps a clock that
//! advances while "playing" and reports `TimeUpdate`/`Ended` the way a
//! media element would.

use async_trait::async_trait;
use mood_playback::{AudioElement, AudioEvent, PlaybackError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

/// Clock resolution
pub const TICK: Duration = Duration::from_millis(250);

/// Length given to every simulated track
pub const DEFAULT_TRACK_LENGTH: Duration = Duration::from_secs(180);

#[derive(Debug)]
struct Clock {
    paused: bool,
    position: Duration,
    duration: Option<Duration>,
}

/// Audio element backed by a ticking clock
pub struct SimulatedAudio {
    source: Option<String>,
    volume: f32,
    track_length: Duration,
    clock: Arc<Mutex<Clock>>,
    events: mpsc::UnboundedSender<AudioEvent>,
    task: JoinHandle<()>,
}

impl SimulatedAudio {
    /// Create the element and the receiver for its events
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(track_length: Duration) -> (Self, mpsc::UnboundedReceiver<AudioEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let clock = Arc::new(Mutex::new(Clock {
            paused: true,
            position: Duration::ZERO,
            duration: None,
        }));

        let task = tokio::spawn(tick(Arc::clone(&clock), events.clone()));

        let audio = Self {
            source: None,
            volume: 1.0,
            track_length,
            clock,
            events,
            task,
        };
        (audio, rx)
    }

    fn clock(&self) -> MutexGuard<'_, Clock> {
        lock(&self.clock)
    }
}

impl Drop for SimulatedAudio {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl std::fmt::Debug for SimulatedAudio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedAudio")
            .field("source", &self.source)
            .field("volume", &self.volume)
            .field("clock", &*self.clock())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AudioElement for SimulatedAudio {
    fn set_source(&mut self, url: &str) {
        debug!(url = %url, "Source set");
        self.source = Some(url.to_string());
        let mut clock = self.clock();
        clock.paused = true;
        clock.position = Duration::ZERO;
        clock.duration = Some(self.track_length);
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    async fn play(&mut self) -> mood_playback::Result<()> {
        let Some(source) = &self.source else {
            return Err(PlaybackError::PlaybackRejected("no source".to_string()));
        };

        if !is_playable(source) {
            warn!(url = %source, "Source cannot be played");
            let _ = self.events.send(AudioEvent::Error);
            return Err(PlaybackError::AudioElement(format!("unsupported source: {}", source)));
        }

        self.clock().paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.clock().paused = true;
    }

    fn is_paused(&self) -> bool {
        self.clock().paused
    }

    fn position(&self) -> Duration {
        self.clock().position
    }

    fn set_position(&mut self, position: Duration) {
        let mut clock = self.clock();
        clock.position = clock.duration.map_or(position, |d| position.min(d));
    }

    fn duration(&self) -> Option<Duration> {
        self.clock().duration
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
}

async fn tick(clock: Arc<Mutex<Clock>>, events: mpsc::UnboundedSender<AudioEvent>) {
    let mut ticker = time::interval(TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let event = {
            let mut clock = lock(&clock);
            let Some(duration) = clock.duration else {
                continue;
            };
            if clock.paused {
                continue;
            }

            clock.position = (clock.position + TICK).min(duration);
            if clock.position >= duration {
                clock.paused = true;
                AudioEvent::Ended
            } else {
                AudioEvent::TimeUpdate {
                    position: clock.position,
                    duration: Some(duration),
                }
            }
        };

        if events.send(event).is_err() {
            break;
        }
    }
}

fn lock(clock: &Mutex<Clock>) -> MutexGuard<'_, Clock> {
    clock.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Only http(s) and file URLs count as playable
fn is_playable(url: &str) -> bool {
    url::Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https" | "file"))
        .unwrap_or(false)
}
