//! Session module - scenes, the shared timer registry, and action routing
//!
//! A [`Session`] owns the [`TimerManager`] for its whole lifetime and lends it to
//! the column scene on each call. Nothing reaches the registry through global
//! state.
//!
//! Routing:
//!
//! | Scene | Action | Effect |
//! |-------|--------|--------|
//! | Lab | `PressMove` / `ReleaseMove` | update held directions |
//! | Lab | `Interact` | open the columns when next to a bench |
//! | Lab | `Escape` | quit |
//! | Columns | `StartColumn(n)` / `StopColumn(n)` | drive timer `coln` |
//! | Columns | `Escape` | back to the lab |
//!
//! Anything else is ignored in the current scene.

use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::columns::{ColumnGame, ColumnReadout};
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::lab::LabState;
use crate::manager::TimerManager;
use crate::snapshot::{PlayerSnapshot, SessionSnapshot};
use crate::timer::{duration_from_secs, Timer};
use crate::types::{Action, Scene};

/// One play session
#[derive(Debug)]
pub struct Session<C: Clock = SystemClock> {
    timers: TimerManager<C>,
    lab: LabState,
    columns: ColumnGame,
    scene: Scene,
    quit: bool,
}

impl Session<SystemClock> {
    /// Session on the system clock
    pub fn new(config: SessionConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock + Clone> Session<C> {
    /// Session whose column timers all sample `clock`
    pub fn with_clock(config: SessionConfig, clock: C) -> Self {
        let columns = ColumnGame::new();
        let mut timers = TimerManager::new();
        let length = duration_from_secs(config.column_secs);
        columns.register_timers(&mut timers, || Timer::with_clock(length, clock.clone()));

        Self {
            timers,
            lab: LabState::new(config.lab_timing()),
            columns,
            scene: Scene::Lab,
            quit: false,
        }
    }
}

impl<C: Clock> Session<C> {
    /// Assemble a session from parts (custom maps, pre-registered timers)
    pub fn from_parts(timers: TimerManager<C>, lab: LabState, columns: ColumnGame) -> Self {
        Self {
            timers,
            lab,
            columns,
            scene: Scene::Lab,
            quit: false,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn lab(&self) -> &LabState {
        &self.lab
    }

    pub fn timers(&self) -> &TimerManager<C> {
        &self.timers
    }

    /// Apply one action to the current scene
    pub fn apply(&mut self, action: Action) -> Result<(), SessionError> {
        if self.quit {
            return Ok(());
        }

        match self.scene {
            Scene::Lab => self.apply_lab(action),
            Scene::Columns => self.apply_columns(action),
        }
    }

    fn apply_lab(&mut self, action: Action) -> Result<(), SessionError> {
        match action {
            Action::PressMove(dir) => self.lab.press(dir),
            Action::ReleaseMove(dir) => self.lab.release(dir),
            Action::Interact => {
                if let Some(bench) = self.lab.near_bench() {
                    tracing::info!(bench = bench.name, "opening columns");
                    self.enter(Scene::Columns);
                }
            }
            Action::Escape => {
                tracing::info!("quit requested");
                self.quit = true;
            }
            Action::StartColumn(_) | Action::StopColumn(_) => {}
        }
        Ok(())
    }

    fn apply_columns(&mut self, action: Action) -> Result<(), SessionError> {
        let result = match action {
            Action::StartColumn(n) => self.columns.start(&mut self.timers, n),
            Action::StopColumn(n) => self.columns.stop(&mut self.timers, n),
            Action::Escape => {
                self.enter(Scene::Lab);
                Ok(())
            }
            Action::PressMove(_) | Action::ReleaseMove(_) | Action::Interact => Ok(()),
        };

        match result {
            Err(SessionError::NoSuchColumn { index, .. }) => {
                tracing::debug!(column = index, "ignoring unknown column");
                Ok(())
            }
            other => other,
        }
    }

    fn enter(&mut self, scene: Scene) {
        if self.scene == Scene::Lab && scene != Scene::Lab {
            self.lab.release_all();
        }
        tracing::debug!(from = self.scene.as_str(), to = scene.as_str(), "scene change");
        self.scene = scene;
    }

    /// Advance the active scene by `dt`. Timers keep counting on their clock
    /// whichever scene is shown.
    pub fn tick(&mut self, dt: Duration) {
        if self.scene == Scene::Lab && !self.quit {
            self.lab.update(dt.as_secs_f32());
        }
    }

    /// Column readouts, in column order
    pub fn readouts(&self) -> Result<Vec<ColumnReadout>, SessionError> {
        self.columns.readouts(&self.timers)
    }

    /// Plain-data view of everything an observer would draw
    pub fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        let player = self.lab.player();
        let (x, y) = player.position();
        Ok(SessionSnapshot {
            scene: self.scene,
            player: PlayerSnapshot {
                row: player.row(),
                col: player.col(),
                x,
                y,
                moving: player.is_moving(),
            },
            near_bench: self.lab.near_bench().map(|b| b.name),
            prompt: self.lab.prompt(),
            columns: self.readouts()?,
            quit: self.quit,
        })
    }
}
