use crate::columns::ColumnReadout;
use crate::types::Scene;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    pub row: u8,
    pub col: u8,
    /// Pixel centre, mid-slide when `moving`
    pub x: f32,
    pub y: f32,
    pub moving: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub scene: Scene,
    pub player: PlayerSnapshot,
    pub near_bench: Option<&'static str>,
    pub prompt: Option<String>,
    pub columns: Vec<ColumnReadout>,
    pub quit: bool,
}

impl SessionSnapshot {
    /// Readout of column `index` (1-based)
    pub fn column(&self, index: u8) -> Option<&ColumnReadout> {
        self.columns.iter().find(|c| c.index == index)
    }

    pub fn all_finished(&self) -> bool {
        !self.columns.is_empty() && self.columns.iter().all(|c| c.finished)
    }
}
