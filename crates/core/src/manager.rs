//! Timer manager module - a named registry of timers
//!
//! The manager owns every timer registered with it. Callers borrow timers by name
//! to read or drive them; an unknown name is reported as
//! [`TimerError::NotFound`] rather than answered with a default timer.

use std::collections::HashMap;

use crate::clock::{Clock, SystemClock};
use crate::error::TimerError;
use crate::timer::Timer;

/// Registry mapping names to exclusively-owned timers
#[derive(Debug, Clone)]
pub struct TimerManager<C: Clock = SystemClock> {
    timers: HashMap<String, Timer<C>>,
}

impl<C: Clock> TimerManager<C> {
    /// Create an empty manager
    pub fn new() -> Self {
        Self {
            timers: HashMap::new(),
        }
    }

    /// Register `timer` under `name`.
    ///
    /// A timer already registered under the same name is replaced and handed
    /// back to the caller.
    pub fn add_timer(&mut self, name: impl Into<String>, timer: Timer<C>) -> Option<Timer<C>> {
        let name = name.into();
        let previous = self.timers.insert(name.clone(), timer);
        if previous.is_some() {
            tracing::warn!(timer = %name, "replaced existing timer");
        } else {
            tracing::debug!(timer = %name, "registered timer");
        }
        previous
    }

    /// Borrow the live timer registered under `name`
    pub fn get_timer(&self, name: &str) -> Result<&Timer<C>, TimerError> {
        self.timers.get(name).ok_or_else(|| not_found(name))
    }

    /// Mutably borrow the live timer registered under `name`
    pub fn get_timer_mut(&mut self, name: &str) -> Result<&mut Timer<C>, TimerError> {
        self.timers.get_mut(name).ok_or_else(|| not_found(name))
    }

    /// Unregister and return the timer under `name`
    pub fn remove_timer(&mut self, name: &str) -> Result<Timer<C>, TimerError> {
        self.timers.remove(name).ok_or_else(|| not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.timers.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.timers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Reset every registered timer
    pub fn reset_all(&mut self) {
        for timer in self.timers.values_mut() {
            timer.reset();
        }
    }

    /// Drop every registered timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

impl<C: Clock> Default for TimerManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(name: &str) -> TimerError {
    TimerError::NotFound {
        name: name.to_string(),
    }
}
