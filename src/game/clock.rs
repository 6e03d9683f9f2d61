//! Tick sources for the engine
//!
//! A clock hands out [`TimerId`]s for fixed-period timers. The engine keeps
//! the id of the timer it installed and cancels it before installing another,
//! so a clock never has to guard against duplicate tick loops itself.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::warn;

/// Handle to a scheduled fixed-period timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

pub trait TickClock {
    /// Install a timer that fires every `period`, first after one period
    fn schedule(&mut self, period: Duration) -> TimerId;

    /// Cancel a timer. Unknown or already cancelled ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Tokio-backed clock holding at most one interval
pub struct IntervalClock {
    next_id: u64,
    active: Option<(TimerId, Interval)>,
}

impl IntervalClock {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            active: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Wait for the next tick of the installed timer.
    ///
    /// Never resolves while no timer is installed, which makes it safe to use
    /// as a `tokio::select!` branch.
    pub async fn ticked(&mut self) {
        match self.active.as_mut() {
            Some((_, timer)) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickClock for IntervalClock {
    fn schedule(&mut self, period: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        if let Some((previous, _)) = self.active.replace((id, timer)) {
            warn!(?previous, "replaced a timer that was never cancelled");
        }

        id
    }

    fn cancel(&mut self, id: TimerId) {
        if self
            .active
            .as_ref()
            .is_some_and(|(active, _)| *active == id)
        {
            self.active = None;
        }
    }
}

#[derive(Debug, Clone)]
struct ManualTimer {
    id: TimerId,
    period: Duration,
    next_due: Duration,
}

/// Virtual-time clock for deterministic runs.
///
/// Every scheduled timer is kept until cancelled, so a leaked tick loop shows
/// up in [`ManualClock::active_timers`].
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Duration,
    next_id: u64,
    timers: Vec<ManualTimer>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since the clock was created
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// Pop the earliest timer due at or before `deadline`.
    ///
    /// Moves the clock to the firing time and reschedules the timer one
    /// period later. Returns `None` once nothing is due, leaving time as is.
    pub fn next_fire(&mut self, deadline: Duration) -> Option<TimerId> {
        let timer = self
            .timers
            .iter_mut()
            .filter(|timer| timer.next_due <= deadline)
            .min_by_key(|timer| timer.next_due)?;

        self.now = timer.next_due;
        timer.next_due += timer.period;
        Some(timer.id)
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }
}

impl TickClock for ManualClock {
    fn schedule(&mut self, period: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        self.timers.push(ManualTimer {
            id,
            period,
            next_due: self.now + period,
        });

        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|timer| timer.id != id);
    }
}
