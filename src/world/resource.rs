//! Harvestable resources sitting on tiles

use serde::{Deserialize, Serialize};

use crate::core::types::{ResourceId, TileId};
use crate::world::tile::TerrainType;

/// Kind of resource a tile can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Fruit,
    Crop,
    Animal,
    Ore,
    Fish,
    Whale,
}

impl ResourceKind {
    /// Terrain this resource naturally occurs on
    pub fn native_terrain(&self) -> TerrainType {
        match self {
            ResourceKind::Fruit | ResourceKind::Crop => TerrainType::Field,
            ResourceKind::Animal => TerrainType::Forest,
            ResourceKind::Ore => TerrainType::Mountain,
            ResourceKind::Fish => TerrainType::Shore,
            ResourceKind::Whale => TerrainType::Ocean,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub kind: ResourceKind,
    pub tile: TileId,
}
