//! Drawing surface the engine renders onto

use super::state::PixelRect;

/// A 2D raster sized to the configured canvas.
///
/// Rects may extend past the canvas edges; implementations clip them.
pub trait Surface {
    /// Draw the outline of `rect`
    fn stroke_rect(&mut self, rect: PixelRect);

    /// Paint `rect` solid
    fn fill_rect(&mut self, rect: PixelRect);

    /// Erase `rect` back to the background
    fn clear_rect(&mut self, rect: PixelRect);
}

/// A single recorded draw primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    Stroke(PixelRect),
    Fill(PixelRect),
    Clear(PixelRect),
}

/// Surface that records every call instead of drawing.
///
/// Used to drive the engine headless and to assert on what it drew.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn fills(&self) -> Vec<PixelRect> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Fill(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn clears(&self) -> Vec<PixelRect> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Clear(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn strokes(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Stroke(_)))
            .count()
    }

    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn stroke_rect(&mut self, rect: PixelRect) {
        self.calls.push(DrawCall::Stroke(rect));
    }

    fn fill_rect(&mut self, rect: PixelRect) {
        self.calls.push(DrawCall::Fill(rect));
    }

    fn clear_rect(&mut self, rect: PixelRect) {
        self.calls.push(DrawCall::Clear(rect));
    }
}
