//! Grid Snake - a single-cell snake steered around a grid in the terminal
//!
//! This library provides:
//! - Core game-state machine and its seams (game module)
//! - Raster canvas and TUI rendering (render module)
//! - Keyboard translation (input module)
//! - Session bookkeeping (metrics module)
//! - The interactive terminal mode (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;

pub use error::ConfigError;
