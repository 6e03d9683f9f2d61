use std::collections::VecDeque;

use super::action::Direction;

/// A position on the game grid, in cell units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// An axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Previously rendered head rects, oldest first.
///
/// Every tick pushes one segment and evicts at most one, so once a segment
/// is pushed the trail never shrinks below one entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trail {
    segments: VecDeque<PixelRect>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rect: PixelRect) {
        self.segments.push_back(rect);
    }

    /// Remove the oldest segment if more than one is held
    pub fn evict_oldest(&mut self) -> Option<PixelRect> {
        if self.segments.len() > 1 {
            self.segments.pop_front()
        } else {
            None
        }
    }

    pub fn oldest(&self) -> Option<PixelRect> {
        self.segments.front().copied()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Stopped => "STOPPED",
            RunState::Running => "RUNNING",
        }
    }
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine was not running; nothing moved
    Idle,
    /// The head moved to a cell inside the bounds and was drawn
    Moved(Position),
    /// The head left the bounds and the session ended
    Collided(Position),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Left), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
    }

    #[test]
    fn test_trail_keeps_last_segment() {
        let mut trail = Trail::new();
        assert_eq!(trail.evict_oldest(), None);

        let first = PixelRect::new(0, 0, 10, 10);
        let second = PixelRect::new(10, 0, 10, 10);

        trail.push(first);
        assert_eq!(trail.evict_oldest(), None);
        assert_eq!(trail.len(), 1);

        trail.push(second);
        assert_eq!(trail.evict_oldest(), Some(first));
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.oldest(), Some(second));
    }

    #[test]
    fn test_trail_evicts_one_at_a_time() {
        let mut trail = Trail::new();
        for x in 0..3 {
            trail.push(PixelRect::new(x * 10, 0, 10, 10));
        }

        assert_eq!(trail.evict_oldest(), Some(PixelRect::new(0, 0, 10, 10)));
        assert_eq!(trail.len(), 2);
    }

    #[test]
    fn test_run_state() {
        assert_eq!(RunState::default(), RunState::Stopped);
        assert!(RunState::Running.is_running());
        assert!(!RunState::Stopped.is_running());
    }
}
