//! Startup configuration errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("canvas must have a non-zero size, got {width}x{height}")]
    ZeroCanvas { width: u32, height: u32 },

    #[error("canvas of {width}x{height} exceeds the {max} pixel limit")]
    TooLarge { width: u32, height: u32, max: u64 },

    #[error("cells must have a non-zero size, got {width}x{height}")]
    ZeroCell { width: u32, height: u32 },

    #[error("cell of {cell_width}x{cell_height} does not fit a {canvas_width}x{canvas_height} canvas")]
    CellLargerThanCanvas {
        cell_width: u32,
        cell_height: u32,
        canvas_width: u32,
        canvas_height: u32,
    },

    #[error("cell inset {inset} leaves no drawable area in a {width}x{height} cell")]
    InsetTooLarge { inset: u32, width: u32, height: u32 },

    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
}
