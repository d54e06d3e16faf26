//! Timer module - a pausable countdown clock
//!
//! A [`Timer`] counts down a fixed duration by sampling its [`Clock`] rather than
//! accumulating per-frame deltas, so the reported remaining time is correct no
//! matter how often (or how rarely) it is polled.
//!
//! Elapsed time is `elapsed_before_pause` plus the current running interval, if
//! any. It only ever grows, except across [`Timer::reset`].

use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};

/// A countdown timer with start/stop/reset semantics
#[derive(Debug, Clone)]
pub struct Timer<C: Clock = SystemClock> {
    clock: C,
    duration: Duration,
    /// Set while running; the reading taken by the last `start`.
    start_time: Option<Instant>,
    /// Accumulated running time from every completed interval.
    elapsed_before_pause: Duration,
}

impl Timer<SystemClock> {
    /// Create a stopped timer driven by the system clock
    pub fn new(duration: Duration) -> Self {
        Self::with_clock(duration, SystemClock)
    }

    /// Create a stopped timer from a length in seconds.
    ///
    /// Negative or NaN lengths produce a zero-length timer. Lengths too large
    /// for a `Duration` saturate to `Duration::MAX`.
    pub fn from_secs_f64(secs: f64) -> Self {
        Self::new(duration_from_secs(secs))
    }
}

impl<C: Clock> Timer<C> {
    /// Create a stopped timer sampling `clock`
    pub fn with_clock(duration: Duration, clock: C) -> Self {
        Self {
            clock,
            duration,
            start_time: None,
            elapsed_before_pause: Duration::ZERO,
        }
    }

    /// Start counting down. Does nothing if already running.
    pub fn start(&mut self) {
        if self.start_time.is_none() {
            self.start_time = Some(self.clock.now());
        }
    }

    /// Pause, banking the time spent in the current interval.
    /// Does nothing if already stopped.
    pub fn stop(&mut self) {
        if let Some(started) = self.start_time.take() {
            self.elapsed_before_pause += self.clock.now().saturating_duration_since(started);
        }
    }

    /// Stop and discard all progress
    pub fn reset(&mut self) {
        self.start_time = None;
        self.elapsed_before_pause = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }

    /// Total countdown length
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time counted so far, including the current running interval
    pub fn elapsed(&self) -> Duration {
        match self.start_time {
            Some(started) => {
                self.elapsed_before_pause + self.clock.now().saturating_duration_since(started)
            }
            None => self.elapsed_before_pause,
        }
    }

    /// Time left, floored at zero
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed())
    }

    /// Time left in seconds, floored at `0.0`
    pub fn remaining_secs(&self) -> f64 {
        self.remaining().as_secs_f64()
    }

    pub fn is_finished(&self) -> bool {
        self.remaining().is_zero()
    }
}

pub(crate) fn duration_from_secs(secs: f64) -> Duration {
    match Duration::try_from_secs_f64(secs) {
        Ok(duration) => duration,
        Err(_) if secs > 0.0 => Duration::MAX,
        Err(_) => Duration::ZERO,
    }
}
