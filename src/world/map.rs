//! Square tile grid geometry

use serde::{Deserialize, Serialize};

use crate::core::types::TileId;

/// Offsets of the inner ring, row by row from the top-left neighbour
const INNER_RING: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Dimensions of a row-major square grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMap {
    pub width: u32,
    pub height: u32,
}

impl TileMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    pub fn tile_id(&self, x: u32, y: u32) -> Option<TileId> {
        if x < self.width && y < self.height {
            Some(TileId(y * self.width + x))
        } else {
            None
        }
    }

    pub fn coords(&self, id: TileId) -> Option<(u32, u32)> {
        if id.index() < self.len() {
            Some((id.0 % self.width, id.0 / self.width))
        } else {
            None
        }
    }

    /// In-bounds tiles adjacent to (x, y), diagonals included
    pub fn inner_ring(&self, x: u32, y: u32) -> Vec<TileId> {
        INNER_RING
            .iter()
            .map(|(dx, dy)| (i64::from(x) + dx, i64::from(y) + dy))
            .filter(|&(nx, ny)| self.contains(nx, ny))
            .filter_map(|(nx, ny)| self.tile_id(nx as u32, ny as u32))
            .collect()
    }
}
