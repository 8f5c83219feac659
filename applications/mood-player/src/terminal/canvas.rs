use mood_visuals::{Canvas, Frame};
use tracing::trace;

/// Frames between two rendered strips (about every five seconds)
const STRIP_EVERY: u64 = 300;

/// Canvas that condenses a frame into one text strip
///
/// A line terminal cannot redraw at 60 Hz; every `STRIP_EVERY` frames the
/// particle field is projected onto its columns and logged at trace level.
#[derive(Debug, Default)]
pub struct TerminalCanvas {
    last_strip: Option<String>,
}

impl TerminalCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent strip
    pub fn last_strip(&self) -> Option<&str> {
        self.last_strip.as_deref()
    }
}

impl Canvas for TerminalCanvas {
    fn draw(&mut self, frame: &Frame<'_>) {
        if frame.index % STRIP_EVERY != 0 {
            return;
        }
        let strip = strip(frame);
        trace!(frame = frame.index, breathing = frame.breathing, strip = %strip, "Background");
        self.last_strip = Some(strip);
    }
}

/// Brightest particle per column, one glyph per column
pub fn strip(frame: &Frame<'_>) -> String {
    let columns = (frame.viewport.width.max(1.0) as usize).min(512);
    let mut brightest = vec![0.0_f32; columns];

    for (particle, opacity) in frame.particles.iter().zip(frame.opacities()) {
        let column = ((particle.x / frame.viewport.width.max(1.0)) * columns as f32) as usize;
        let column = column.min(columns - 1);
        brightest[column] = brightest[column].max(opacity);
    }

    brightest
        .into_iter()
        .map(|opacity| match opacity {
            o if o <= 0.0 => ' ',
            o if o < 0.06 => '.',
            o if o < 0.1 => '·',
            o if o < 0.14 => '*',
            _ => '✦',
        })
        .collect()
}
