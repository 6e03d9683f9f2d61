use std::time::{Duration, Instant};

/// Bookkeeping shown in the header; it has no influence on the game
pub struct SessionMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub ticks: u32,
    pub runs_started: u32,
    pub games_lost: u32,
    running: bool,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            ticks: 0,
            runs_started: 0,
            games_lost: 0,
            running: false,
        }
    }

    /// Refresh the elapsed time while a run is in progress
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_run_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.ticks = 0;
        self.runs_started += 1;
        self.running = true;
    }

    pub fn on_run_stop(&mut self) {
        self.update();
        self.running = false;
    }

    pub fn on_tick(&mut self) {
        self.ticks += 1;
    }

    pub fn on_game_over(&mut self) {
        self.on_run_stop();
        self.games_lost += 1;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
