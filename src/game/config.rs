use std::time::Duration;

use super::state::{PixelRect, Position};
use crate::error::ConfigError;

/// Fixed period between two ticks of a running game
pub const TICK_PERIOD: Duration = Duration::from_millis(500);

/// Largest canvas area accepted, in pixels
pub const MAX_CANVAS_PIXELS: u64 = 4096 * 4096;

/// Static grid configuration, supplied once at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Width of one cell in pixels
    pub cell_width: u32,
    /// Height of one cell in pixels
    pub cell_height: u32,
    /// Padding drawn inside each cell when rendering the snake
    pub cell_inset: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            canvas_width: 400,
            canvas_height: 400,
            cell_width: 40,
            cell_height: 40,
            cell_inset: 0,
        }
    }
}

impl GridConfig {
    /// Create a configuration with the given canvas and cell sizes and no inset
    pub fn new(canvas_width: u32, canvas_height: u32, cell_width: u32, cell_height: u32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            cell_width,
            cell_height,
            cell_inset: 0,
        }
    }

    pub fn with_inset(mut self, cell_inset: u32) -> Self {
        self.cell_inset = cell_inset;
        self
    }

    /// Check that the configuration describes a drawable grid.
    ///
    /// Cells that don't tile the canvas evenly are accepted; the grid lines
    /// just stop short of the canvas edge. Cells no larger than a canvas
    /// within [`MAX_CANVAS_PIXELS`] keep every pixel coordinate the head can
    /// reach before colliding inside `i32`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_canvas_size(self.canvas_width, self.canvas_height)?;

        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(ConfigError::ZeroCell {
                width: self.cell_width,
                height: self.cell_height,
            });
        }

        if self.cell_width > self.canvas_width || self.cell_height > self.canvas_height {
            return Err(ConfigError::CellLargerThanCanvas {
                cell_width: self.cell_width,
                cell_height: self.cell_height,
                canvas_width: self.canvas_width,
                canvas_height: self.canvas_height,
            });
        }

        let min_side = self.cell_width.min(self.cell_height);
        if self.cell_inset.saturating_mul(2) >= min_side {
            return Err(ConfigError::InsetTooLarge {
                inset: self.cell_inset,
                width: self.cell_width,
                height: self.cell_height,
            });
        }

        Ok(())
    }

    /// Whether the cells tile the canvas without a remainder
    pub fn tiles_evenly(&self) -> bool {
        self.canvas_width % self.cell_width == 0 && self.canvas_height % self.cell_height == 0
    }

    /// The cell nearest the canvas centre, rounding halves up
    pub fn starting_position(&self) -> Position {
        let columns = self.canvas_width as f64 / self.cell_width as f64;
        let rows = self.canvas_height as f64 / self.cell_height as f64;

        Position::new((columns / 2.0).round() as i32, (rows / 2.0).round() as i32)
    }

    /// Pixel rect the snake occupies when its head is at `pos`
    pub fn cell_rect(&self, pos: Position) -> PixelRect {
        let inset = self.cell_inset as i32;

        PixelRect::new(
            pos.x * self.cell_width as i32 + inset,
            pos.y * self.cell_height as i32 + inset,
            self.cell_width as i32 - inset * 2,
            self.cell_height as i32 - inset * 2,
        )
    }

    /// Rect covering the whole canvas
    pub fn canvas_rect(&self) -> PixelRect {
        PixelRect::new(0, 0, self.canvas_width as i32, self.canvas_height as i32)
    }

    /// Stroked cell borders making up the grid, column by column
    pub fn grid_cells(&self) -> impl Iterator<Item = PixelRect> + '_ {
        let (cw, ch) = (self.cell_width as i32, self.cell_height as i32);
        let (w, h) = (self.canvas_width as i32, self.canvas_height as i32);

        (0..w)
            .step_by(self.cell_width as usize)
            .flat_map(move |x| (0..h).step_by(ch as usize).map(move |y| PixelRect::new(x, y, cw, ch)))
    }

    /// Out-of-bounds test on the head's pixel origin.
    ///
    /// The bounds are inclusive on both ends, so a head whose origin sits
    /// exactly on the right or bottom canvas edge is still in play.
    pub fn is_out_of_bounds(&self, pos: Position) -> bool {
        let x = pos.x as i64 * self.cell_width as i64;
        let y = pos.y as i64 * self.cell_height as i64;

        x < 0 || x > self.canvas_width as i64 || y < 0 || y > self.canvas_height as i64
    }
}

/// Reject empty canvases and canvases over [`MAX_CANVAS_PIXELS`]
pub fn check_canvas_size(width: u32, height: u32) -> Result<(), ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::ZeroCanvas { width, height });
    }

    if width as u64 * height as u64 > MAX_CANVAS_PIXELS {
        return Err(ConfigError::TooLarge {
            width,
            height,
            max: MAX_CANVAS_PIXELS,
        });
    }

    Ok(())
}
