//! Core game logic module for Snake
//!
//! This module contains the game-state machine and the seams it talks
//! through (surface, clock, loss notifier). It has no terminal dependencies
//! and can be driven headless with a [`RecordingSurface`] and a
//! [`ManualClock`].

pub mod action;
pub mod clock;
pub mod config;
pub mod engine;
pub mod notify;
pub mod state;
pub mod surface;

// Re-export commonly used types
pub use action::{Direction, Key};
pub use clock::{IntervalClock, ManualClock, TickClock, TimerId};
pub use config::{GridConfig, TICK_PERIOD};
pub use engine::GameEngine;
pub use notify::{LossCounter, LossNotifier};
pub use state::{PixelRect, Position, RunState, TickOutcome, Trail};
pub use surface::{DrawCall, RecordingSurface, Surface};
