//! Mood Player - Background particles
//!
//! A field of slowly falling, twinkling particles tinted per mood:
//! - `ParticleField` holds the particles and the per-frame math
//! - `Canvas` is whatever draws a frame (terminal, window, test recorder)
//! - `AnimationLoop` runs the field on its own task at about 60 Hz
//!
//! # Example
//!
//! ```rust
//! use mood_core::{MoodKey, MoodTable, Track};
//! use mood_visuals::{ParticleField, Viewport};
//! use rand::SeedableRng;
//!
//! let table = MoodTable::with_fallback(Track::new("f", "https://cdn.example.com/f.mp3"));
//! let preset = table.get(MoodKey::Hype).particles;
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//!
//! let mut field = ParticleField::new(preset, Viewport::new(800.0, 600.0), false, &mut rng);
//! assert_eq!(field.particles().len(), 92);
//!
//! field.set_breathing(true);
//! field.step();
//! ```

mod animation;
mod canvas;
mod particle;

pub use animation::{AnimationLoop, VisualCommand, FRAME_INTERVAL};
pub use canvas::{Canvas, Frame, NullCanvas};
pub use particle::{Particle, ParticleField, Viewport, REDUCED_MOTION_FACTOR};
