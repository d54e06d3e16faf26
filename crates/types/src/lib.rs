//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, session driving, the JSON adapter).
//!
//! # Grid Dimensions
//!
//! The lab is a tile grid derived from the window size:
//!
//! - **Width**: 25 columns (800 px / 32 px tiles, indexed 0-24)
//! - **Height**: 18 rows (600 px / 32 px tiles, indexed 0-17)
//! - **Origin**: row 0 is the bottom row, column 0 the left column
//! - **Player spawn**: (row 9, col 12), the centre of the grid
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MOVE_INTERVAL_SECS` | 0.3 | Minimum time between two grid steps |
//! | `SLIDE_RATIO` | 0.9 | Slide duration as a fraction of the step interval |
//! | `COLUMN_TIMER_SECS` | 30.0 | Countdown length of each column timer |
//! | `TICK_MS` | 16 | Fixed adapter tick (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use chem_dash_types::{Action, Direction, Scene, GRID_HEIGHT, GRID_WIDTH};
//!
//! let action = Action::from_str("pressUp").unwrap();
//! assert_eq!(action, Action::PressMove(Direction::Up));
//!
//! assert_eq!(Action::from_str("start2"), Some(Action::StartColumn(2)));
//! assert_eq!(Scene::Columns.as_str(), "columns");
//!
//! assert_eq!(GRID_WIDTH, 25);
//! assert_eq!(GRID_HEIGHT, 18);
//! ```

/// Window width in pixels
pub const SCREEN_WIDTH: u32 = 800;

/// Window height in pixels
pub const SCREEN_HEIGHT: u32 = 600;

/// Window title
pub const SCREEN_TITLE: &str = "Chem Dash (Working Title), Starter";

/// Edge length of one grid tile in pixels
pub const TILE_SIZE: u32 = 32;

/// Grid width in tiles (25 columns)
pub const GRID_WIDTH: u8 = (SCREEN_WIDTH / TILE_SIZE) as u8;

/// Grid height in tiles (18 rows)
pub const GRID_HEIGHT: u8 = (SCREEN_HEIGHT / TILE_SIZE) as u8;

/// Player spawn row (grid centre)
pub const PLAYER_START_ROW: u8 = GRID_HEIGHT / 2;

/// Player spawn column (grid centre)
pub const PLAYER_START_COL: u8 = GRID_WIDTH / 2;

/// Minimum time between two grid steps while a direction is held
pub const MOVE_INTERVAL_SECS: f32 = 0.3;

/// Slide duration as a fraction of [`MOVE_INTERVAL_SECS`]
pub const SLIDE_RATIO: f32 = 0.9;

/// Number of countdown columns in the column mini-game
pub const COLUMN_COUNT: u8 = 3;

/// Countdown length of each column timer in seconds
pub const COLUMN_TIMER_SECS: f64 = 30.0;

/// Fixed adapter tick interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Maximum number of actions accepted in a single adapter command
pub const MAX_ACTIONS_PER_COMMAND: usize = 16;

/// Registry name of the timer bound to column `index` (1-based).
///
/// # Examples
///
/// ```
/// use chem_dash_types::column_timer_name;
///
/// assert_eq!(column_timer_name(1), "col1");
/// assert_eq!(column_timer_name(3), "col3");
/// ```
pub fn column_timer_name(index: u8) -> String {
    format!("col{index}")
}

/// Format a remaining time for display, one decimal place plus `s`.
///
/// # Examples
///
/// ```
/// use chem_dash_types::format_remaining;
///
/// assert_eq!(format_remaining(30.0), "30.0s");
/// assert_eq!(format_remaining(24.96), "25.0s");
/// assert_eq!(format_remaining(0.0), "0.0s");
/// ```
pub fn format_remaining(secs: f64) -> String {
    format!("{secs:.1}s")
}


/// A grid direction.
///
/// Rows grow upward, so `Up` increases the row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in resolution order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Right,
        Direction::Left,
    ];

    /// Step delta as `(d_row, d_col)`
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (1, 0),
            Direction::Down => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
        }
    }

    /// Parse direction from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use chem_dash_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("up"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("LEFT"), Some(Direction::Left));
    /// assert_eq!(Direction::from_str("north"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to capitalized name, as used inside action strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }
}

/// The scene currently shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scene {
    /// Tile grid exploration
    #[default]
    Lab,
    /// Three countdown columns
    Columns,
}

impl Scene {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scene::Lab => "lab",
            Scene::Columns => "columns",
        }
    }
}

/// Contents of one lab tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tile {
    #[default]
    Floor,
    Wall,
    /// Part of the bench at this index in the map's bench list
    Bench(u8),
}

impl Tile {
    /// Whether the player may stand on this tile
    pub fn is_walkable(&self) -> bool {
        matches!(self, Tile::Floor)
    }
}

/// Session actions that can be applied to modify game state
///
/// These are semantic commands, independent of any keyboard layout.
/// Each scene reacts only to the actions it understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Begin holding a movement direction (lab)
    PressMove(Direction),
    /// Stop holding a movement direction (lab)
    ReleaseMove(Direction),
    /// Use the bench next to the player (lab)
    Interact,
    /// Start the countdown of column `n` (1-based, columns scene)
    StartColumn(u8),
    /// Pause the countdown of column `n` (1-based, columns scene)
    StopColumn(u8),
    /// Leave the columns scene, or quit from the lab
    Escape,
}

impl Action {
    /// Parse action from string (for the adapter protocol)
    ///
    /// # Examples
    ///
    /// ```
    /// use chem_dash_types::{Action, Direction};
    ///
    /// assert_eq!(Action::from_str("pressLeft"), Some(Action::PressMove(Direction::Left)));
    /// assert_eq!(Action::from_str("releaseup"), Some(Action::ReleaseMove(Direction::Up)));
    /// assert_eq!(Action::from_str("stop3"), Some(Action::StopColumn(3)));
    /// assert_eq!(Action::from_str("escape"), Some(Action::Escape));
    /// assert_eq!(Action::from_str("start"), None);
    /// assert_eq!(Action::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "interact" => return Some(Action::Interact),
            "escape" => return Some(Action::Escape),
            _ => {}
        }

        if let Some(dir) = lower.strip_prefix("press") {
            return Direction::from_str(dir).map(Action::PressMove);
        }
        if let Some(dir) = lower.strip_prefix("release") {
            return Direction::from_str(dir).map(Action::ReleaseMove);
        }
        if let Some(n) = lower.strip_prefix("start") {
            return parse_column_index(n).map(Action::StartColumn);
        }
        if let Some(n) = lower.strip_prefix("stop") {
            return parse_column_index(n).map(Action::StopColumn);
        }
        None
    }

    /// Convert to camelCase string for the adapter protocol
    pub fn to_protocol_string(&self) -> String {
        match self {
            Action::PressMove(dir) => format!("press{}", dir.as_str()),
            Action::ReleaseMove(dir) => format!("release{}", dir.as_str()),
            Action::Interact => "interact".to_string(),
            Action::StartColumn(n) => format!("start{n}"),
            Action::StopColumn(n) => format!("stop{n}"),
            Action::Escape => "escape".to_string(),
        }
    }
}

/// Column index in its canonical decimal form: ASCII digits, no sign, no leading zero
fn parse_column_index(digits: &str) -> Option<u8> {
    let canonical = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'));
    if !canonical {
        return None;
    }
    digits.parse().ok()
}
