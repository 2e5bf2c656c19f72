use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Guard used in place of a zero elapsed time when computing rates
pub const MIN_ELAPSED_SECS: f64 = 0.001;

/// Source of the current instant
pub trait Clock: Clone {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to; clones share the same time
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Stopwatch that only accumulates time while running.
///
/// Pausing folds the current interval into the accumulated total, so a later
/// resume continues from the frozen value instead of recomputing from the
/// start instant.
#[derive(Debug, Clone)]
pub struct Stopwatch<C: Clock = SystemClock> {
    clock: C,
    started_at: Option<Instant>,
    resumed_at: Option<Instant>,
    accumulated: Duration,
}

impl<C: Clock> Stopwatch<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            started_at: None,
            resumed_at: None,
            accumulated: Duration::ZERO,
        }
    }

    /// Starts the stopwatch. Returns false if it was already started this run.
    pub fn start(&mut self) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        let now = self.clock.now();
        self.started_at = Some(now);
        self.resumed_at = Some(now);
        true
    }

    /// Freezes the accumulated time. Returns false if it was not running.
    pub fn pause(&mut self) -> bool {
        match self.resumed_at.take() {
            Some(resumed_at) => {
                self.accumulated += self.clock.now().saturating_duration_since(resumed_at);
                true
            }
            None => false,
        }
    }

    /// Continues a started, paused stopwatch. Returns false otherwise.
    pub fn resume(&mut self) -> bool {
        if self.started_at.is_none() || self.resumed_at.is_some() {
            return false;
        }
        self.resumed_at = Some(self.clock.now());
        true
    }

    pub fn stop(&mut self) {
        self.pause();
    }

    pub fn reset(&mut self) {
        self.started_at = None;
        self.resumed_at = None;
        self.accumulated = Duration::ZERO;
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.resumed_at.is_some()
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn elapsed(&self) -> Duration {
        let running = self
            .resumed_at
            .map(|resumed_at| self.clock.now().saturating_duration_since(resumed_at))
            .unwrap_or_default();
        self.accumulated + running
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
