//! Pixel raster the engine draws on

use crate::error::ConfigError;
use crate::game::{GridConfig, PixelRect, Surface, config::check_canvas_size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Pixel {
    #[default]
    Blank,
    Stroke,
    Fill,
}

/// A fixed-size raster of [`Pixel`]s.
///
/// Draw calls are clipped to the canvas; parts of a rect that fall outside
/// are dropped silently.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        check_canvas_size(width, height)?;

        Ok(Self {
            width,
            height,
            pixels: vec![Pixel::Blank; width as usize * height as usize],
        })
    }

    /// A canvas sized to the configured canvas dimensions
    pub fn for_config(config: &GridConfig) -> Result<Self, ConfigError> {
        Self::new(config.canvas_width, config.canvas_height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Strongest pixel in the block `[x0, x1) x [y0, y1)`.
    ///
    /// Fill wins over stroke, stroke over blank.
    pub fn sample(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> Pixel {
        let (x1, y1) = (x1.min(self.width), y1.min(self.height));
        let x0 = x0.min(x1);
        let mut strongest = Pixel::Blank;

        for y in y0..y1 {
            let row = self.index(0, y);
            for pixel in &self.pixels[row + x0 as usize..row + x1 as usize] {
                if *pixel == Pixel::Fill {
                    return Pixel::Fill;
                }
                strongest = strongest.max(*pixel);
            }
        }

        strongest
    }

    pub fn count(&self, kind: Pixel) -> usize {
        self.pixels.iter().filter(|pixel| **pixel == kind).count()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Clip `rect` to the canvas, as half-open pixel ranges
    fn clip(&self, rect: PixelRect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.x.max(0) as i64;
        let y0 = rect.y.max(0) as i64;
        let x1 = (rect.x as i64 + rect.width as i64).min(self.width as i64);
        let y1 = (rect.y as i64 + rect.height as i64).min(self.height as i64);

        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    fn paint(&mut self, rect: PixelRect, pixel: Pixel) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };

        for y in y0..y1 {
            let row = self.index(0, y);
            self.pixels[row + x0 as usize..row + x1 as usize].fill(pixel);
        }
    }

    fn set(&mut self, x: i64, y: i64, pixel: Pixel) {
        if x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64 {
            let index = self.index(x as u32, y as u32);
            self.pixels[index] = pixel;
        }
    }
}

impl Surface for RasterCanvas {
    fn stroke_rect(&mut self, rect: PixelRect) {
        if rect.width <= 0 || rect.height <= 0 {
            return;
        }

        let (left, top) = (rect.x as i64, rect.y as i64);
        let right = left + rect.width as i64 - 1;
        let bottom = top + rect.height as i64 - 1;

        for x in left..=right {
            self.set(x, top, Pixel::Stroke);
            self.set(x, bottom, Pixel::Stroke);
        }
        for y in top..=bottom {
            self.set(left, y, Pixel::Stroke);
            self.set(right, y, Pixel::Stroke);
        }
    }

    fn fill_rect(&mut self, rect: PixelRect) {
        self.paint(rect, Pixel::Fill);
    }

    fn clear_rect(&mut self, rect: PixelRect) {
        self.paint(rect, Pixel::Blank);
    }
}
