//! Drawing surface abstraction

use crate::particle::{Particle, Viewport};

/// One frame handed to a canvas
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Frames drawn since the loop started
    pub index: u64,
    pub viewport: Viewport,
    pub breathing: bool,
    pub particles: &'a [Particle],
}

impl Frame<'_> {
    /// Per-particle opacity for this frame, in particle order
    pub fn opacities(&self) -> impl Iterator<Item = f32> + '_ {
        let breathing = self.breathing;
        self.particles.iter().map(move |p| p.opacity(breathing))
    }
}

/// Something that can draw particle frames
///
/// Called from the animation task; implementations must not block.
pub trait Canvas: Send {
    /// Draw a frame, replacing the previous one
    fn draw(&mut self, frame: &Frame<'_>);
}

/// Canvas that discards every frame (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn draw(&mut self, _frame: &Frame<'_>) {}
}
