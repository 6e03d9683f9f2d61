use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{IsTerminal, Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::game::{GameEngine, GridConfig, IntervalClock, Key, RunState, TickOutcome};
use crate::input::{HostKey, InputHandler};
use crate::metrics::SessionMetrics;
use crate::render::{LossBanner, RasterCanvas, Renderer};

/// Keyboard-driven game in the terminal.
///
/// Owns the one engine of the process. Nothing moves until [`HumanMode::run`]
/// is listening for keys and Space is pressed.
pub struct HumanMode {
    engine: GameEngine<RasterCanvas, IntervalClock, LossBanner>,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        let canvas = RasterCanvas::for_config(&config)?;
        let engine = GameEngine::new(config, canvas, IntervalClock::new(), LossBanner::new())?;

        Ok(Self {
            engine,
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        ensure_surface(stderr().is_terminal())?;

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!("listening for input");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game tick, only while the engine has a timer installed
                _ = self.engine.clock_mut().ticked() => {
                    self.on_tick();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.engine, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(
            runs = self.metrics.runs_started,
            lost = self.metrics.games_lost,
            "quitting"
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            // The loss notice is modal: a key press only dismisses it
            if self.engine.notifier().is_pending() {
                self.engine.notifier_mut().dismiss();
                return;
            }

            match self.input_handler.handle_key_event(key) {
                HostKey::Game(key) => self.dispatch(key),
                HostKey::Quit => self.should_quit = true,
                HostKey::Ignored => {}
            }
        }
    }

    fn dispatch(&mut self, key: Key) {
        let before = self.engine.run_state();
        self.engine.handle_input(key);

        match (before, self.engine.run_state()) {
            (RunState::Stopped, RunState::Running) => self.metrics.on_run_start(),
            (RunState::Running, RunState::Stopped) => self.metrics.on_run_stop(),
            _ => debug!(?key, "steer"),
        }
    }

    fn on_tick(&mut self) {
        match self.engine.tick() {
            TickOutcome::Moved(_) => self.metrics.on_tick(),
            TickOutcome::Collided(_) => {
                self.metrics.on_tick();
                self.metrics.on_game_over();
            }
            TickOutcome::Idle => {}
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// The canvas is drawn to stderr, which has to be a terminal
fn ensure_surface(is_terminal: bool) -> Result<(), ConfigError> {
    if is_terminal {
        Ok(())
    } else {
        Err(ConfigError::SurfaceUnavailable(
            "stderr is not a terminal".into(),
        ))
    }
}
