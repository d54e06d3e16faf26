//! Player module - grid position plus a smooth slide between tiles
//!
//! The player's logical position is always a tile. When it steps, the pixel
//! position slides from where it was to the new tile centre with smoothstep
//! easing; the logical tile changes immediately.

use crate::map::{tile_center, LabMap};
use crate::types::{GRID_HEIGHT, GRID_WIDTH};

/// Smoothstep easing, `t*t*(3-2t)`
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Slide {
    from: (f32, f32),
    to: (f32, f32),
    progress: f32,
}

/// The player sprite's game-side state
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    row: u8,
    col: u8,
    x: f32,
    y: f32,
    slide: Option<Slide>,
}

impl Player {
    /// Create a player resting on `(row, col)`
    pub fn new(row: u8, col: u8) -> Self {
        let (x, y) = tile_center(row, col);
        Self {
            row,
            col,
            x,
            y,
            slide: None,
        }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// Current pixel centre as `(x, y)`
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Whether a slide is in progress
    pub fn is_moving(&self) -> bool {
        self.slide.is_some()
    }

    /// Try to step by `(d_row, d_col)`.
    ///
    /// The target is clamped into the grid first. Returns true if the player
    /// changed tile; a blocked or unchanged target leaves everything as is.
    pub fn try_step(&mut self, d_row: i8, d_col: i8, map: &LabMap) -> bool {
        let new_row = (self.row as i16 + d_row as i16).clamp(0, GRID_HEIGHT as i16 - 1);
        let new_col = (self.col as i16 + d_col as i16).clamp(0, GRID_WIDTH as i16 - 1);

        if !map.is_walkable(new_row, new_col) {
            return false;
        }
        if new_row == self.row as i16 && new_col == self.col as i16 {
            return false;
        }

        self.row = new_row as u8;
        self.col = new_col as u8;
        self.slide = Some(Slide {
            from: (self.x, self.y),
            to: tile_center(self.row, self.col),
            progress: 0.0,
        });
        true
    }

    /// Advance the slide by `dt` seconds of a `slide_secs`-long animation
    pub fn update_position(&mut self, dt: f32, slide_secs: f32) {
        let Some(slide) = self.slide.as_mut() else {
            return;
        };

        if slide_secs > 0.0 {
            slide.progress += dt / slide_secs;
        } else {
            slide.progress = 1.0;
        }

        if slide.progress >= 1.0 {
            (self.x, self.y) = slide.to;
            self.slide = None;
        } else {
            let t = smoothstep(slide.progress);
            self.x = slide.from.0 + (slide.to.0 - slide.from.0) * t;
            self.y = slide.from.1 + (slide.to.1 - slide.from.1) * t;
        }
    }
}
