//! Particle field state and per-frame update

use mood_core::ParticlePreset;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Share of particles kept when reduced motion is requested
pub const REDUCED_MOTION_FACTOR: f32 = 0.35;

/// Phase advance per frame while breathing
const PHASE_STEP: f32 = 0.02;

/// Pulse used while not breathing
const RESTING_PULSE: f32 = 0.22;

/// Drawing area in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport (negative sizes become zero)
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// One particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Radius
    pub r: f32,
    pub vx: f32,
    pub vy: f32,
    /// Base alpha
    pub alpha: f32,
    /// Twinkle phase
    pub phase: f32,
}

impl Particle {
    fn spawn<R: Rng + ?Sized>(preset: &ParticlePreset, viewport: Viewport, rng: &mut R) -> Self {
        Self {
            x: between(rng, 0.0, viewport.width),
            y: between(rng, 0.0, viewport.height),
            r: between(rng, preset.size_min, preset.size_max),
            vx: between(rng, -preset.drift, preset.drift),
            vy: between(rng, preset.speed * 0.4, preset.speed * 1.1),
            alpha: between(rng, 0.05, 0.14),
            phase: between(rng, 0.2, 0.9),
        }
    }

    /// Opacity for this frame
    pub fn opacity(&self, breathing: bool) -> f32 {
        let pulse = if breathing {
            0.5 + 0.5 * self.phase.sin()
        } else {
            RESTING_PULSE
        };
        self.alpha * (0.65 + pulse * 0.6)
    }

    fn advance(&mut self, viewport: Viewport, breathing: bool) {
        self.x += self.vx;
        self.y += self.vy;
        if breathing {
            self.phase += PHASE_STEP;
        }

        let Viewport { width, height } = viewport;
        if self.y - self.r > height {
            self.y = -self.r;
        } else if self.y + self.r < 0.0 {
            self.y = height + self.r;
        }
        if self.x - self.r > width {
            self.x = -self.r;
        } else if self.x + self.r < 0.0 {
            self.x = width + self.r;
        }
    }
}

fn between<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

/// The particle field of the current mood
#[derive(Debug, Clone)]
pub struct ParticleField {
    preset: ParticlePreset,
    viewport: Viewport,
    reduced_motion: bool,
    breathing: bool,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Build a field for `preset`
    pub fn new<R: Rng + ?Sized>(
        preset: ParticlePreset,
        viewport: Viewport,
        reduced_motion: bool,
        rng: &mut R,
    ) -> Self {
        let mut field = Self {
            preset,
            viewport,
            reduced_motion,
            breathing: false,
            particles: Vec::new(),
        };
        field.rebuild(rng);
        field
    }

    /// Particle count for the current preset and motion setting
    pub fn target_count(&self) -> usize {
        if self.reduced_motion {
            (self.preset.count as f32 * REDUCED_MOTION_FACTOR).floor() as usize
        } else {
            self.preset.count
        }
    }

    /// Regenerate every particle
    pub fn rebuild<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let count = self.target_count();
        let (preset, viewport) = (self.preset, self.viewport);
        self.particles = (0..count)
            .map(|_| Particle::spawn(&preset, viewport, rng))
            .collect();
    }

    /// Switch to another preset; particles are regenerated, not morphed
    pub fn set_preset<R: Rng + ?Sized>(&mut self, preset: ParticlePreset, rng: &mut R) {
        self.preset = preset;
        self.rebuild(rng);
    }

    /// New viewport size; the field is rebuilt
    pub fn resize<R: Rng + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) {
        self.viewport = viewport;
        self.rebuild(rng);
    }

    /// Turn twinkling on or off
    pub fn set_breathing(&mut self, breathing: bool) {
        self.breathing = breathing;
    }

    /// Whether twinkling is on
    pub fn breathing(&self) -> bool {
        self.breathing
    }

    /// Advance one frame
    pub fn step(&mut self) {
        let (viewport, breathing) = (self.viewport, self.breathing);
        for particle in &mut self.particles {
            particle.advance(viewport, breathing);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn preset(&self) -> ParticlePreset {
        self.preset
    }
}
