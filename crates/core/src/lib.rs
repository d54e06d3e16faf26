//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the countdown timers, the timer registry, and the
//! headless state of both scenes. It has **zero dependencies** on rendering,
//! input devices, networking, or I/O, making it:
//!
//! - **Deterministic**: every timer samples an injectable [`Clock`]; tests use
//!   [`ManualClock`] and never sleep
//! - **Testable**: all rules are plain state transitions
//! - **Portable**: can sit behind a terminal, a window, or the JSON adapter
//!
//! # Module Structure
//!
//! - [`clock`]: the `Clock` trait, `SystemClock` and `ManualClock`
//! - [`timer`]: a pausable countdown sampled from a clock
//! - [`manager`]: a name -> timer registry with checked lookups
//! - [`map`]: the 25x18 lab grid with walls and benches
//! - [`player`]: tile position with smoothstep sliding
//! - [`lab`]: held-direction movement and bench proximity
//! - [`columns`]: the three-column countdown mini-game
//! - [`session`]: scene routing over an explicitly owned timer registry
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use chem_dash_core::{ManualClock, Timer, TimerManager};
//!
//! let clock = ManualClock::new();
//! let mut timers = TimerManager::new();
//! timers.add_timer("col1", Timer::with_clock(Duration::from_secs(30), clock.clone()));
//!
//! timers.get_timer_mut("col1").unwrap().start();
//! clock.advance(Duration::from_secs(5));
//! assert_eq!(timers.get_timer("col1").unwrap().remaining_secs(), 25.0);
//!
//! assert!(timers.get_timer("col9").is_err());
//! ```

pub mod clock;
pub mod columns;
pub mod config;
pub mod error;
pub mod lab;
pub mod manager;
pub mod map;
pub mod player;
pub mod session;
pub mod snapshot;
pub mod timer;

pub use chem_dash_types as types;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use columns::{ColumnGame, ColumnReadout};
pub use config::SessionConfig;
pub use error::{SessionError, TimerError};
pub use lab::{LabState, LabTiming};
pub use manager::TimerManager;
pub use map::{Bench, LabMap};
pub use player::Player;
pub use session::Session;
pub use snapshot::{PlayerSnapshot, SessionSnapshot};
pub use timer::Timer;
