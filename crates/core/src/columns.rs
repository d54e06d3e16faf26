//! Column mini-game module - three countdowns driven by name
//!
//! The column scene does not own its timers. It knows the names they were
//! registered under and borrows them from the [`TimerManager`] lent by the
//! caller on every call.

use crate::clock::Clock;
use crate::error::SessionError;
use crate::manager::TimerManager;
use crate::timer::Timer;
use crate::types::{column_timer_name, format_remaining, COLUMN_COUNT};

/// What a column shows this frame
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnReadout {
    /// 1-based column index
    pub index: u8,
    pub timer: String,
    pub remaining_secs: f64,
    pub display: String,
    pub running: bool,
    pub finished: bool,
}

impl ColumnReadout {
    fn from_timer<C: Clock>(index: u8, name: &str, timer: &Timer<C>) -> Self {
        let remaining_secs = timer.remaining_secs();
        Self {
            index,
            timer: name.to_string(),
            remaining_secs,
            display: format_remaining(remaining_secs),
            running: timer.is_running(),
            finished: timer.is_finished(),
        }
    }
}

/// The column scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnGame {
    timer_names: Vec<String>,
}

impl ColumnGame {
    /// Columns bound to `col1`..`colN`
    pub fn new() -> Self {
        Self::with_count(COLUMN_COUNT)
    }

    pub fn with_count(count: u8) -> Self {
        Self {
            timer_names: (1..=count).map(column_timer_name).collect(),
        }
    }

    /// Register one stopped timer per column, built by `make_timer`
    pub fn register_timers<C: Clock>(
        &self,
        manager: &mut TimerManager<C>,
        mut make_timer: impl FnMut() -> Timer<C>,
    ) {
        for name in &self.timer_names {
            manager.add_timer(name.clone(), make_timer());
        }
    }

    pub fn count(&self) -> u8 {
        self.timer_names.len() as u8
    }

    pub fn timer_names(&self) -> &[String] {
        &self.timer_names
    }

    fn timer_name(&self, index: u8) -> Result<&str, SessionError> {
        index
            .checked_sub(1)
            .and_then(|i| self.timer_names.get(i as usize))
            .map(String::as_str)
            .ok_or(SessionError::NoSuchColumn {
                index,
                count: self.count(),
            })
    }

    /// Start the countdown of column `index` (1-based)
    pub fn start<C: Clock>(
        &self,
        manager: &mut TimerManager<C>,
        index: u8,
    ) -> Result<(), SessionError> {
        let name = self.timer_name(index)?;
        manager.get_timer_mut(name)?.start();
        tracing::debug!(column = index, "column started");
        Ok(())
    }

    /// Pause the countdown of column `index` (1-based)
    pub fn stop<C: Clock>(
        &self,
        manager: &mut TimerManager<C>,
        index: u8,
    ) -> Result<(), SessionError> {
        let name = self.timer_name(index)?;
        manager.get_timer_mut(name)?.stop();
        tracing::debug!(column = index, "column stopped");
        Ok(())
    }

    /// Current readout of every column, in column order
    pub fn readouts<C: Clock>(
        &self,
        manager: &TimerManager<C>,
    ) -> Result<Vec<ColumnReadout>, SessionError> {
        self.timer_names
            .iter()
            .zip(1u8..)
            .map(|(name, index)| -> Result<ColumnReadout, SessionError> {
                let timer = manager.get_timer(name)?;
                Ok(ColumnReadout::from_timer(index, name, timer))
            })
            .collect()
    }
}

impl Default for ColumnGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::TimerError;
    use std::time::Duration;

    fn setup() -> (ColumnGame, TimerManager<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let game = ColumnGame::new();
        let mut manager = TimerManager::new();
        let c = clock.clone();
        game.register_timers(&mut manager, || {
            Timer::with_clock(Duration::from_secs(30), c.clone())
        });
        (game, manager, clock)
    }

    #[test]
    fn registers_three_named_timers() {
        let (game, manager, _) = setup();
        assert_eq!(game.count(), 3);
        assert_eq!(manager.names(), vec!["col1", "col2", "col3"]);
    }

    #[test]
    fn columns_run_independently() {
        let (game, mut manager, clock) = setup();
        game.start(&mut manager, 1).unwrap();
        clock.advance(Duration::from_secs(5));
        game.start(&mut manager, 3).unwrap();
        clock.advance(Duration::from_secs(5));
        game.stop(&mut manager, 1).unwrap();

        let r = game.readouts(&manager).unwrap();
        assert_eq!(r[0].display, "20.0s");
        assert!(!r[0].running);
        assert_eq!(r[1].display, "30.0s");
        assert_eq!(r[2].display, "25.0s");
        assert!(r[2].running);
    }

    #[test]
    fn bad_column_index_is_rejected() {
        let (game, mut manager, _) = setup();
        assert_eq!(
            game.start(&mut manager, 0),
            Err(SessionError::NoSuchColumn { index: 0, count: 3 })
        );
        assert_eq!(
            game.stop(&mut manager, 4),
            Err(SessionError::NoSuchColumn { index: 4, count: 3 })
        );
    }

    #[test]
    fn missing_timer_surfaces_not_found() {
        let (game, mut manager, _) = setup();
        manager.remove_timer("col2").unwrap();
        assert_eq!(
            game.start(&mut manager, 2),
            Err(SessionError::Timer(TimerError::NotFound {
                name: "col2".to_string()
            }))
        );
        assert!(game.readouts(&manager).is_err());
    }
}
