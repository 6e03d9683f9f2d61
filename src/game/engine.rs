use std::time::Duration;

use tracing::{debug, info, warn};

use super::{
    action::{Direction, Key},
    clock::{ManualClock, TickClock, TimerId},
    config::{GridConfig, TICK_PERIOD},
    notify::LossNotifier,
    state::{Position, RunState, TickOutcome, Trail},
    surface::Surface,
};
use crate::error::ConfigError;

/// The game engine that owns all game state and drives the surface
pub struct GameEngine<S, C, N> {
    config: GridConfig,
    surface: S,
    clock: C,
    notifier: N,
    timer: Option<TimerId>,
    direction: Direction,
    head: Position,
    trail: Trail,
    run_state: RunState,
}

impl<S, C, N> GameEngine<S, C, N>
where
    S: Surface,
    C: TickClock,
    N: LossNotifier,
{
    /// Validate `config`, draw the grid once and place the head at the centre
    pub fn new(config: GridConfig, surface: S, clock: C, notifier: N) -> Result<Self, ConfigError> {
        config.validate()?;

        if !config.tiles_evenly() {
            warn!(
                canvas_width = config.canvas_width,
                canvas_height = config.canvas_height,
                cell_width = config.cell_width,
                cell_height = config.cell_height,
                "cells do not tile the canvas evenly"
            );
        }

        let head = config.starting_position();
        let mut engine = Self {
            config,
            surface,
            clock,
            notifier,
            timer: None,
            direction: Direction::default(),
            head,
            trail: Trail::new(),
            run_state: RunState::Stopped,
        };
        engine.draw_grid();

        Ok(engine)
    }

    /// Regrid, recentre the head and start ticking.
    ///
    /// Direction and trail carry over from the previous session.
    pub fn start_game(&mut self) {
        self.draw_grid();
        self.head = self.config.starting_position();
        self.run_state = RunState::Running;
        self.install_timer();

        info!(head = ?self.head, direction = self.direction.as_str(), "game started");
    }

    /// Cancel the tick timer and stop.
    ///
    /// With `end_game` the loss is reported and the whole canvas cleared;
    /// otherwise the last frame stays on the surface.
    pub fn stop_game(&mut self, end_game: bool) {
        if let Some(timer) = self.timer.take() {
            self.clock.cancel(timer);
        }
        self.run_state = RunState::Stopped;

        if end_game {
            info!(head = ?self.head, "game lost");
            self.notifier.notify_loss();
            self.surface.clear_rect(self.config.canvas_rect());
        } else {
            info!("game stopped");
        }
    }

    pub fn toggle(&mut self) {
        if self.run_state.is_running() {
            self.stop_game(false);
        } else {
            self.start_game();
        }
    }

    /// Advance the head one cell and redraw it
    pub fn tick(&mut self) -> TickOutcome {
        if !self.run_state.is_running() {
            return TickOutcome::Idle;
        }

        self.head = self.head.moved_in_direction(self.direction);
        let rect = self.config.cell_rect(self.head);
        self.trail.push(rect);

        if self.config.is_out_of_bounds(self.head) {
            self.stop_game(true);
            return TickOutcome::Collided(self.head);
        }

        self.surface.fill_rect(rect);

        if let Some(tail) = self.trail.evict_oldest() {
            self.surface.clear_rect(tail);
        }

        debug!(head = ?self.head, trail = self.trail.len(), "tick");
        TickOutcome::Moved(self.head)
    }

    pub fn handle_input(&mut self, key: Key) {
        match key {
            Key::Space => self.toggle(),
            _ => {
                if let Some(direction) = key.direction() {
                    self.direction = direction;
                }
            }
        }
    }

    fn install_timer(&mut self) {
        if let Some(previous) = self.timer.take() {
            self.clock.cancel(previous);
        }
        self.timer = Some(self.clock.schedule(TICK_PERIOD));
    }

    fn draw_grid(&mut self) {
        for cell in self.config.grid_cells() {
            self.surface.stroke_rect(cell);
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn has_active_timer(&self) -> bool {
        self.timer.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }
}

impl<S, N> GameEngine<S, ManualClock, N>
where
    S: Surface,
    N: LossNotifier,
{
    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Run virtual time forward by `by`, ticking for every timer that fires.
    ///
    /// Returns the number of ticks delivered.
    pub fn advance_clock(&mut self, by: Duration) -> usize {
        let deadline = self.clock.now() + by;
        let mut fired = 0;

        while self.clock.next_fire(deadline).is_some() {
            self.tick();
            fired += 1;
        }

        self.clock.set_now(deadline);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        notify::LossCounter,
        state::PixelRect,
        surface::{DrawCall, RecordingSurface},
    };

    type TestEngine = GameEngine<RecordingSurface, ManualClock, LossCounter>;

    fn engine_with(config: GridConfig) -> TestEngine {
        GameEngine::new(
            config,
            RecordingSurface::new(),
            ManualClock::new(),
            LossCounter::default(),
        )
        .unwrap()
    }

    fn engine() -> TestEngine {
        engine_with(GridConfig::default())
    }

    #[test]
    fn test_initialize_draws_grid_and_centres_head() {
        let engine = engine();

        assert_eq!(engine.surface().strokes(), 100);
        assert_eq!(engine.head(), Position::new(5, 5));
        assert_eq!(engine.direction(), Direction::Up);
        assert_eq!(engine.run_state(), RunState::Stopped);
        assert!(!engine.has_active_timer());
        assert!(engine.trail().is_empty());
    }

    #[test]
    fn test_initialize_rejects_invalid_config() {
        let result = GameEngine::new(
            GridConfig::new(400, 400, 0, 40),
            RecordingSurface::new(),
            ManualClock::new(),
            LossCounter::default(),
        );
        assert!(matches!(result, Err(ConfigError::ZeroCell { .. })));
    }

    #[test]
    fn test_start_game() {
        let mut engine = engine();
        engine.surface_mut().reset();

        engine.start_game();

        assert_eq!(engine.run_state(), RunState::Running);
        assert!(engine.has_active_timer());
        assert_eq!(engine.clock().active_timers(), 1);
        assert_eq!(engine.surface().strokes(), 100);
    }

    #[test]
    fn test_double_start_keeps_single_timer() {
        let mut engine = engine();

        engine.start_game();
        engine.start_game();

        assert_eq!(engine.clock().active_timers(), 1);
        assert_eq!(engine.advance_clock(Duration::from_millis(500)), 1);
    }

    #[test]
    fn test_stop_when_stopped_is_harmless() {
        let mut engine = engine();

        engine.stop_game(false);
        engine.stop_game(false);

        assert_eq!(engine.run_state(), RunState::Stopped);
        assert_eq!(engine.clock().active_timers(), 0);
        assert_eq!(engine.notifier().losses, 0);
    }

    #[test]
    fn test_tick_moves_one_cell_per_direction() {
        for (key, expected) in [
            (Key::ArrowUp, Position::new(5, 4)),
            (Key::ArrowDown, Position::new(5, 6)),
            (Key::ArrowLeft, Position::new(4, 5)),
            (Key::ArrowRight, Position::new(6, 5)),
        ] {
            let mut engine = engine();
            engine.start_game();
            engine.handle_input(key);

            assert_eq!(engine.tick(), TickOutcome::Moved(expected));
        }
    }

    #[test]
    fn test_tick_when_stopped_is_idle() {
        let mut engine = engine();
        assert_eq!(engine.tick(), TickOutcome::Idle);
        assert_eq!(engine.head(), Position::new(5, 5));
        assert!(engine.trail().is_empty());
    }

    #[test]
    fn test_tick_renders_head_and_evicts_previous() {
        let mut engine = engine_with(GridConfig::default().with_inset(3));
        engine.start_game();
        engine.surface_mut().reset();

        engine.tick();
        assert_eq!(
            engine.surface().calls(),
            &[DrawCall::Fill(PixelRect::new(203, 163, 34, 34))]
        );

        engine.surface_mut().reset();
        engine.tick();
        assert_eq!(
            engine.surface().calls(),
            &[
                DrawCall::Fill(PixelRect::new(203, 123, 34, 34)),
                DrawCall::Clear(PixelRect::new(203, 163, 34, 34)),
            ]
        );
        assert_eq!(engine.trail().len(), 1);
    }

    #[test]
    fn test_collision_ends_game_once() {
        let mut engine = engine();
        engine.start_game();
        engine.handle_input(Key::ArrowLeft);

        // Columns 4..=0 are in play, column -1 is out
        for _ in 0..5 {
            assert!(matches!(engine.tick(), TickOutcome::Moved(_)));
        }
        engine.surface_mut().reset();

        assert_eq!(engine.tick(), TickOutcome::Collided(Position::new(-1, 5)));
        assert_eq!(engine.notifier().losses, 1);
        assert_eq!(engine.run_state(), RunState::Stopped);
        assert!(!engine.has_active_timer());
        assert_eq!(engine.clock().active_timers(), 0);
        assert!(engine.surface().fills().is_empty());
        assert_eq!(
            engine.surface().clears(),
            vec![PixelRect::new(0, 0, 400, 400)]
        );

        // No further ticks are delivered once the timer is gone
        assert_eq!(engine.advance_clock(Duration::from_secs(5)), 0);
        assert_eq!(engine.notifier().losses, 1);
    }

    #[test]
    fn test_far_edge_is_inclusive() {
        let mut engine = engine();
        engine.start_game();
        engine.handle_input(Key::ArrowRight);

        // x = 10 puts the origin on the canvas edge, still in bounds
        for _ in 0..5 {
            assert!(matches!(engine.tick(), TickOutcome::Moved(_)));
        }
        assert_eq!(engine.head(), Position::new(10, 5));
        assert_eq!(engine.tick(), TickOutcome::Collided(Position::new(11, 5)));
    }

    #[test]
    fn test_collision_via_clock() {
        let mut engine = engine();
        engine.start_game();
        engine.handle_input(Key::ArrowUp);

        // Rows 4..=0 then -1: six ticks, the last one collides
        assert_eq!(engine.advance_clock(Duration::from_millis(3000)), 6);
        assert_eq!(engine.notifier().losses, 1);
        assert_eq!(engine.run_state(), RunState::Stopped);
    }

    #[test]
    fn test_stop_without_end_keeps_frame() {
        let mut engine = engine();
        engine.start_game();
        engine.tick();
        engine.surface_mut().reset();

        engine.stop_game(false);

        assert!(engine.surface().calls().is_empty());
        assert_eq!(engine.notifier().losses, 0);
    }

    #[test]
    fn test_toggle_with_short_clock_advance() {
        let mut engine = engine();

        engine.handle_input(Key::Space);
        assert_eq!(engine.run_state(), RunState::Running);
        assert_eq!(engine.clock().active_timers(), 1);

        assert_eq!(engine.advance_clock(Duration::from_millis(499)), 0);

        engine.handle_input(Key::Space);
        assert_eq!(engine.run_state(), RunState::Stopped);
        assert_eq!(engine.clock().active_timers(), 0);
        assert!(engine.surface().fills().is_empty());
    }

    #[test]
    fn test_reversal_is_allowed() {
        let mut engine = engine();
        engine.start_game();
        engine.handle_input(Key::ArrowRight);
        engine.tick();
        let x = engine.head().x;

        engine.handle_input(Key::ArrowLeft);
        engine.tick();

        assert_eq!(engine.direction(), Direction::Left);
        assert_eq!(engine.head().x, x - 1);
    }

    #[test]
    fn test_restart_recentres_head() {
        let mut engine = engine();
        engine.start_game();
        engine.handle_input(Key::ArrowDown);
        engine.tick();
        engine.tick();
        engine.stop_game(false);

        engine.start_game();

        assert_eq!(engine.head(), Position::new(5, 5));
        assert_eq!(engine.direction(), Direction::Down);
    }

    #[test]
    fn test_trail_carries_over_after_loss() {
        let mut engine = engine();
        engine.start_game();
        engine.handle_input(Key::ArrowUp);
        engine.advance_clock(Duration::from_millis(3000));

        // The collided rect was pushed but never evicted
        assert_eq!(engine.trail().len(), 2);
        let stale = engine.trail().oldest();

        engine.start_game();
        engine.surface_mut().reset();
        engine.tick();

        assert_eq!(engine.trail().len(), 2);
        assert_eq!(engine.surface().clears(), vec![stale.unwrap()]);
    }

    #[test]
    fn test_direction_keys_work_while_stopped() {
        let mut engine = engine();
        engine.handle_input(Key::ArrowLeft);

        assert_eq!(engine.direction(), Direction::Left);
        assert_eq!(engine.run_state(), RunState::Stopped);
    }
}
