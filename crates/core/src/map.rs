//! Lab map module - the tile grid the player walks on
//!
//! The map is a 25x18 grid where each tile is floor, wall, or part of a bench.
//! Uses a flat array, row-major, with row 0 at the bottom of the screen.
//! Coordinates are `(row, col)`: row ranges 0..17 (bottom to top), col ranges
//! 0..24 (left to right).

use arrayvec::ArrayVec;

use crate::types::{Tile, GRID_HEIGHT, GRID_WIDTH, TILE_SIZE};

/// Total number of tiles on the map
const MAP_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// Maximum number of benches a map can hold
pub const MAX_BENCHES: usize = 8;

/// An interactive bench placed on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bench {
    pub name: &'static str,
    /// What interacting does, shown in the prompt ("view your columns").
    pub label: &'static str,
    /// Tile used for proximity checks (the bench's centre tile).
    pub anchor: (u8, u8),
}

/// Pixel centre of the tile at `(row, col)` as `(x, y)`
pub fn tile_center(row: u8, col: u8) -> (f32, f32) {
    let half = (TILE_SIZE / 2) as f32;
    (
        col as f32 * TILE_SIZE as f32 + half,
        row as f32 * TILE_SIZE as f32 + half,
    )
}

/// The lab grid
#[derive(Debug, Clone, PartialEq)]
pub struct LabMap {
    /// Flat array of tiles, row-major order (row * WIDTH + col)
    tiles: [Tile; MAP_SIZE],
    benches: ArrayVec<Bench, MAX_BENCHES>,
}

impl LabMap {
    /// Create a map with no walls or benches
    pub fn empty() -> Self {
        Self {
            tiles: [Tile::Floor; MAP_SIZE],
            benches: ArrayVec::new(),
        }
    }

    /// The starter lab: an enclosed room with two benches along the top wall
    pub fn starter() -> Self {
        let mut map = Self::empty();

        // Bottom and top walls.
        map.fill(0, 0, 1, 23, Tile::Wall);
        map.fill(17, 17, 1, 23, Tile::Wall);
        // Side walls.
        map.fill(1, 17, 1, 1, Tile::Wall);
        map.fill(1, 17, 23, 23, Tile::Wall);

        map.add_bench(
            Bench {
                name: "bench_col_1",
                label: "view your columns",
                anchor: (16, 12),
            },
            (11, 13),
        );
        map.add_bench(
            Bench {
                name: "bench_hood_1",
                label: "view your hood",
                anchor: (16, 6),
            },
            (5, 7),
        );
        map
    }

    #[inline(always)]
    fn index(row: i16, col: i16) -> Option<usize> {
        if row < 0 || row >= GRID_HEIGHT as i16 || col < 0 || col >= GRID_WIDTH as i16 {
            return None;
        }
        Some((row as usize) * (GRID_WIDTH as usize) + (col as usize))
    }

    /// Tile at `(row, col)`, or `None` when out of bounds
    pub fn get(&self, row: i16, col: i16) -> Option<Tile> {
        Self::index(row, col).map(|idx| self.tiles[idx])
    }

    /// Set the tile at `(row, col)`. Returns false if out of bounds.
    pub fn set(&mut self, row: i16, col: i16, tile: Tile) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.tiles[idx] = tile;
                true
            }
            None => false,
        }
    }

    /// Fill the inclusive rectangle of rows `r0..=r1`, cols `c0..=c1`
    pub fn fill(&mut self, r0: u8, r1: u8, c0: u8, c1: u8, tile: Tile) {
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.set(row as i16, col as i16, tile);
            }
        }
    }

    /// Place a bench on its anchor row, spanning columns `cols.0..=cols.1`.
    ///
    /// Returns the bench index, or `None` when the map is full.
    pub fn add_bench(&mut self, bench: Bench, cols: (u8, u8)) -> Option<u8> {
        let index = u8::try_from(self.benches.len()).ok()?;
        self.benches.try_push(bench).ok()?;
        let row = bench.anchor.0;
        self.fill(row, row, cols.0, cols.1, Tile::Bench(index));
        Some(index)
    }

    pub fn benches(&self) -> &[Bench] {
        &self.benches
    }

    pub fn bench(&self, index: u8) -> Option<&Bench> {
        self.benches.get(index as usize)
    }

    /// Whether the player may stand at `(row, col)`
    pub fn is_walkable(&self, row: i16, col: i16) -> bool {
        matches!(self.get(row, col), Some(tile) if tile.is_walkable())
    }

    /// First bench whose anchor is exactly one orthogonal step from `(row, col)`
    pub fn bench_adjacent_to(&self, row: u8, col: u8) -> Option<u8> {
        self.benches
            .iter()
            .position(|b| {
                let dr = (b.anchor.0 as i16 - row as i16).abs();
                let dc = (b.anchor.1 as i16 - col as i16).abs();
                dr + dc == 1
            })
            .map(|i| i as u8)
    }
}

impl Default for LabMap {
    fn default() -> Self {
        Self::starter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_map_is_enclosed() {
        let map = LabMap::starter();
        assert_eq!(map.get(0, 12), Some(Tile::Wall));
        assert_eq!(map.get(17, 1), Some(Tile::Wall));
        assert_eq!(map.get(9, 1), Some(Tile::Wall));
        assert_eq!(map.get(9, 23), Some(Tile::Wall));
        assert_eq!(map.get(9, 12), Some(Tile::Floor));
        // Corners outside the wall runs stay open.
        assert_eq!(map.get(0, 0), Some(Tile::Floor));
        assert_eq!(map.get(17, 24), Some(Tile::Floor));
    }

    #[test]
    fn starter_benches_occupy_their_tiles() {
        let map = LabMap::starter();
        assert_eq!(map.benches().len(), 2);
        for col in 11..=13 {
            assert_eq!(map.get(16, col), Some(Tile::Bench(0)));
        }
        for col in 5..=7 {
            assert_eq!(map.get(16, col), Some(Tile::Bench(1)));
        }
        assert!(!map.is_walkable(16, 12));
        assert_eq!(map.bench(0).map(|b| b.name), Some("bench_col_1"));
    }

    #[test]
    fn out_of_bounds_is_not_walkable() {
        let mut map = LabMap::empty();
        assert!(map.get(-1, 0).is_none());
        assert!(map.get(0, GRID_WIDTH as i16).is_none());
        assert!(!map.is_walkable(GRID_HEIGHT as i16, 0));
        assert!(!map.set(-1, -1, Tile::Wall));
    }

    #[test]
    fn adjacency_is_manhattan_one_from_anchor() {
        let map = LabMap::starter();
        assert_eq!(map.bench_adjacent_to(15, 12), Some(0));
        assert_eq!(map.bench_adjacent_to(15, 6), Some(1));
        // Diagonal and two-away do not count.
        assert_eq!(map.bench_adjacent_to(15, 11), None);
        assert_eq!(map.bench_adjacent_to(14, 12), None);
    }

    #[test]
    fn tile_centres() {
        assert_eq!(tile_center(0, 0), (16.0, 16.0));
        assert_eq!(tile_center(9, 12), (400.0, 304.0));
    }
}
