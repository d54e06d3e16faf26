//! Session configuration, loaded from environment variables
//!
//! - `CHEM_DASH_COLUMN_SECS`: countdown length of each column (default 30)
//! - `CHEM_DASH_MOVE_INTERVAL`: seconds between grid steps (default 0.3)
//! - `CHEM_DASH_SLIDE_RATIO`: slide length as a fraction of the step interval (default 0.9)
//!
//! Unparseable, non-positive or unrepresentable values fall back to the default.

use std::str::FromStr;
use std::time::Duration;

use crate::lab::LabTiming;
use crate::types::{COLUMN_TIMER_SECS, MOVE_INTERVAL_SECS, SLIDE_RATIO};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub column_secs: f64,
    pub move_interval_secs: f32,
    pub slide_ratio: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            column_secs: COLUMN_TIMER_SECS,
            move_interval_secs: MOVE_INTERVAL_SECS,
            slide_ratio: SLIDE_RATIO,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup (the environment, or a map in tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            column_secs: positive(&lookup, "CHEM_DASH_COLUMN_SECS")
                .filter(|&secs| representable(secs))
                .unwrap_or(defaults.column_secs),
            move_interval_secs: positive(&lookup, "CHEM_DASH_MOVE_INTERVAL")
                .unwrap_or(defaults.move_interval_secs),
            slide_ratio: positive(&lookup, "CHEM_DASH_SLIDE_RATIO")
                .unwrap_or(defaults.slide_ratio),
        }
    }

    pub fn lab_timing(&self) -> LabTiming {
        LabTiming::from_interval(self.move_interval_secs, self.slide_ratio)
    }
}

/// Parse `key` as a finite, strictly positive number
pub fn positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr + PartialOrd + Default + Copy + Into<f64>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) if v > T::default() && Into::<f64>::into(v).is_finite() => Some(v),
        _ => {
            tracing::warn!(key, value = %raw, "ignoring invalid configuration value");
            None
        }
    }
}

fn representable(secs: f64) -> bool {
    let ok = Duration::try_from_secs_f64(secs).is_ok();
    if !ok {
        tracing::warn!(secs, "column length does not fit a timer, using the default");
    }
    ok
}
