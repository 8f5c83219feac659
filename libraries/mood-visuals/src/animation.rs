//! Animation loop on its own task
//!
//! The loop owns the particle field. Everyone else talks to it through
//! `VisualCommand`s; it never waits on playback or the network.

use crate::canvas::{Canvas, Frame};
use crate::particle::{ParticleField, Viewport};
use mood_core::ParticlePreset;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

/// Display cadence (about 60 Hz)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Commands accepted by the animation loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualCommand {
    /// Regenerate the field for a mood preset
    SetPreset(ParticlePreset),

    /// Twinkle on (player screen) or off
    SetBreathing(bool),

    /// Viewport changed; rebuild the field
    Resize(Viewport),
}

/// Handle to a running animation loop
///
/// Dropping the handle stops the loop.
#[derive(Debug)]
pub struct AnimationLoop {
    commands: mpsc::UnboundedSender<VisualCommand>,
    task: JoinHandle<()>,
}

impl AnimationLoop {
    /// Start animating `preset` on a new task
    pub fn spawn(
        preset: ParticlePreset,
        viewport: Viewport,
        reduced_motion: bool,
        canvas: Box<dyn Canvas>,
    ) -> Self {
        Self::spawn_with_rng(preset, viewport, reduced_motion, canvas, StdRng::from_entropy())
    }

    /// Start with a caller-provided RNG (deterministic fields)
    pub fn spawn_with_rng(
        preset: ParticlePreset,
        viewport: Viewport,
        reduced_motion: bool,
        mut canvas: Box<dyn Canvas>,
        mut rng: StdRng,
    ) -> Self {
        let (commands, mut rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let mut field = ParticleField::new(preset, viewport, reduced_motion, &mut rng);
            let mut ticker = time::interval(FRAME_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut index: u64 = 0;

            info!(particles = field.particles().len(), "Animation loop started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        field.step();
                        canvas.draw(&Frame {
                            index,
                            viewport: field.viewport(),
                            breathing: field.breathing(),
                            particles: field.particles(),
                        });
                        index += 1;
                    }
                    command = rx.recv() => {
                        let Some(command) = command else {
                            break;
                        };
                        debug!(?command, "Visual command");
                        match command {
                            VisualCommand::SetPreset(preset) => field.set_preset(preset, &mut rng),
                            VisualCommand::SetBreathing(on) => field.set_breathing(on),
                            VisualCommand::Resize(viewport) => field.resize(viewport, &mut rng),
                        }
                    }
                }
            }

            debug!(frames = index, "Animation loop stopped");
        });

        Self { commands, task }
    }

    /// Retint the background for a mood
    pub fn set_preset(&self, preset: ParticlePreset) {
        self.send(VisualCommand::SetPreset(preset));
    }

    /// Turn twinkling on or off
    pub fn set_breathing(&self, breathing: bool) {
        self.send(VisualCommand::SetBreathing(breathing));
    }

    /// Report a new viewport size
    pub fn resize(&self, viewport: Viewport) {
        self.send(VisualCommand::Resize(viewport));
    }

    /// Stop the loop
    pub fn stop(self) {
        drop(self);
    }

    fn send(&self, command: VisualCommand) {
        if self.commands.send(command).is_err() {
            debug!(?command, "Animation loop gone, command dropped");
        }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.task.abort();
    }
}
