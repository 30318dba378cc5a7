//! Map tiles - terrain, ownership and the single variation slot

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::{CityId, ImprovementId, PlayerId, ResourceId, TileId};

/// Terrain type of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainType {
    Field,
    Forest,
    Mountain,
    Shore,
    Ocean,
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TerrainType::Field => "Field",
            TerrainType::Forest => "Forest",
            TerrainType::Mountain => "Mountain",
            TerrainType::Shore => "Shore",
            TerrainType::Ocean => "Ocean",
        };
        f.write_str(name)
    }
}

/// What occupies a tile besides its terrain (at most one)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variation {
    Resource(ResourceId),
    Improvement(ImprovementId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub x: u32,
    pub y: u32,
    pub terrain: TerrainType,
    pub variation: Option<Variation>,
    /// City whose territory includes this tile
    pub owner_city: Option<CityId>,
    /// Player whose unit currently stands here
    pub occupant: Option<PlayerId>,
}

impl Tile {
    pub fn new(id: TileId, x: u32, y: u32, terrain: TerrainType) -> Self {
        Self {
            id,
            x,
            y,
            terrain,
            variation: None,
            owner_city: None,
            occupant: None,
        }
    }

    /// Empty or holding a resource, i.e. an improvement may be placed here
    pub fn is_buildable(&self) -> bool {
        matches!(self.variation, None | Some(Variation::Resource(_)))
    }

    pub fn resource(&self) -> Option<ResourceId> {
        match self.variation {
            Some(Variation::Resource(id)) => Some(id),
            _ => None,
        }
    }

    pub fn improvement(&self) -> Option<ImprovementId> {
        match self.variation {
            Some(Variation::Improvement(id)) => Some(id),
            _ => None,
        }
    }

    /// Not blocked by a unit belonging to someone else
    pub fn is_accessible_to(&self, player: PlayerId) -> bool {
        self.occupant.map_or(true, |occupant| occupant == player)
    }
}
