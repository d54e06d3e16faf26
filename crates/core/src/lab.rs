//! Lab scene module - held-direction movement and bench proximity
//!
//! Holding a direction steps the player one tile at a time, at most once per
//! move interval and never while a slide is still running. Opposite directions
//! cancel out; perpendicular ones combine into a diagonal step.

use arrayvec::ArrayVec;

use crate::map::{Bench, LabMap};
use crate::player::Player;
use crate::types::{Direction, PLAYER_START_COL, PLAYER_START_ROW};

/// Tunables for lab movement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabTiming {
    /// Minimum seconds between two steps
    pub move_interval: f32,
    /// Seconds a slide between tiles takes
    pub slide: f32,
}

impl Default for LabTiming {
    fn default() -> Self {
        Self::from_interval(crate::types::MOVE_INTERVAL_SECS, crate::types::SLIDE_RATIO)
    }
}

impl LabTiming {
    pub fn from_interval(move_interval: f32, slide_ratio: f32) -> Self {
        Self {
            move_interval,
            slide: move_interval * slide_ratio,
        }
    }
}

/// State of the lab scene
#[derive(Debug, Clone)]
pub struct LabState {
    map: LabMap,
    player: Player,
    timing: LabTiming,
    held: ArrayVec<Direction, 4>,
    time_since_move: f32,
    near_bench: Option<u8>,
}

impl LabState {
    /// Starter lab with the player in the centre of the grid
    pub fn new(timing: LabTiming) -> Self {
        Self::with_map(LabMap::starter(), timing)
    }

    pub fn with_map(map: LabMap, timing: LabTiming) -> Self {
        Self::with_player(map, Player::new(PLAYER_START_ROW, PLAYER_START_COL), timing)
    }

    pub fn with_player(map: LabMap, player: Player, timing: LabTiming) -> Self {
        let near_bench = map.bench_adjacent_to(player.row(), player.col());
        Self {
            map,
            player,
            timing,
            held: ArrayVec::new(),
            time_since_move: 0.0,
            near_bench,
        }
    }

    pub fn map(&self) -> &LabMap {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Start holding `dir`
    pub fn press(&mut self, dir: Direction) {
        if !self.held.contains(&dir) {
            // Capacity equals the number of directions, so this cannot fail.
            let _ = self.held.try_push(dir);
        }
    }

    /// Stop holding `dir`
    pub fn release(&mut self, dir: Direction) {
        self.held.retain(|d| *d != dir);
    }

    /// Forget every held direction
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.held.contains(&dir)
    }

    /// Net step requested by the held directions
    fn held_delta(&self) -> (i8, i8) {
        Direction::ALL
            .iter()
            .filter(|d| self.held.contains(d))
            .fold((0, 0), |(r, c), d| {
                let (dr, dc) = d.delta();
                (r + dr, c + dc)
            })
    }

    /// Advance the scene by `dt` seconds. Returns true if the player stepped.
    pub fn update(&mut self, dt: f32) -> bool {
        self.time_since_move += dt;

        let (d_row, d_col) = self.held_delta();
        let mut stepped = false;
        if (d_row != 0 || d_col != 0)
            && self.time_since_move >= self.timing.move_interval
            && !self.player.is_moving()
        {
            stepped = self.player.try_step(d_row, d_col, &self.map);
            if stepped {
                tracing::debug!(
                    row = self.player.row(),
                    col = self.player.col(),
                    "player stepped"
                );
            }
            self.time_since_move = 0.0;
        }

        self.player.update_position(dt, self.timing.slide);
        self.near_bench = self
            .map
            .bench_adjacent_to(self.player.row(), self.player.col());
        stepped
    }

    /// Bench the player is standing next to, if any
    pub fn near_bench(&self) -> Option<&Bench> {
        self.near_bench.and_then(|i| self.map.bench(i))
    }

    /// Interaction prompt for the adjacent bench
    pub fn prompt(&self) -> Option<String> {
        self.near_bench()
            .map(|bench| format!("Press SPACE to {}", bench.label))
    }
}

impl Default for LabState {
    fn default() -> Self {
        Self::new(LabTiming::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMING: LabTiming = LabTiming {
        move_interval: 0.3,
        slide: 0.27,
    };

    #[test]
    fn no_step_before_interval() {
        let mut lab = LabState::new(TIMING);
        lab.press(Direction::Up);
        assert!(!lab.update(0.2));
        assert!(lab.update(0.2));
        assert_eq!(lab.player().row(), 10);
    }

    #[test]
    fn no_step_while_sliding() {
        let slow_slide = LabTiming {
            move_interval: 0.1,
            slide: 0.5,
        };
        let mut lab = LabState::new(slow_slide);
        lab.press(Direction::Right);
        assert!(lab.update(0.1));
        assert!(lab.player().is_moving());

        // Interval long passed, but the slide is still running.
        assert!(!lab.update(0.2));
        assert!(!lab.update(0.25));
        assert!(!lab.player().is_moving());

        assert!(lab.update(0.0));
        assert_eq!(lab.player().col(), 14);
    }

    #[test]
    fn opposite_directions_cancel() {
        let mut lab = LabState::new(TIMING);
        lab.press(Direction::Left);
        lab.press(Direction::Right);
        assert!(!lab.update(1.0));
        assert_eq!(lab.player().col(), 12);
    }

    #[test]
    fn perpendicular_directions_step_diagonally() {
        let mut lab = LabState::new(TIMING);
        lab.press(Direction::Up);
        lab.press(Direction::Left);
        assert!(lab.update(0.3));
        assert_eq!((lab.player().row(), lab.player().col()), (10, 11));
    }

    #[test]
    fn press_is_idempotent_and_release_clears() {
        let mut lab = LabState::default();
        lab.press(Direction::Down);
        lab.press(Direction::Down);
        assert!(lab.is_held(Direction::Down));
        lab.release(Direction::Down);
        assert!(!lab.is_held(Direction::Down));
        assert!(!lab.update(1.0));
    }

    #[test]
    fn prompt_when_next_to_bench() {
        let lab = LabState::with_player(LabMap::starter(), Player::new(15, 12), TIMING);
        assert_eq!(lab.near_bench().map(|b| b.name), Some("bench_col_1"));
        assert_eq!(
            lab.prompt().as_deref(),
            Some("Press SPACE to view your columns")
        );

        let lab = LabState::new(TIMING);
        assert!(lab.prompt().is_none());
    }
}
