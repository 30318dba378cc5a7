//! Consequences - atomic world changes planned by actions
//!
//! Planning and committing are separate phases. A [`ConsequenceChain`] is
//! built against a read-only world, expanding cascades as entries are
//! logged; [`commit`] then applies every entry in order.

pub mod chain;
pub mod commit;

pub use chain::ConsequenceChain;
pub use commit::commit;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::{CityId, ImprovementId, PlayerId, ResourceId, TileId};
use crate::world::improvement::ImprovementType;
use crate::world::tile::TerrainType;

/// One atomic change to the world
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Consequence {
    RemoveResource {
        resource: ResourceId,
        tile: TileId,
    },
    ChangeTerrain {
        tile: TileId,
        terrain: TerrainType,
    },
    /// Places the improvement, replacing any variation (or sets the level of
    /// an improvement of the same type already there)
    BuildImprovement {
        tile: TileId,
        kind: ImprovementType,
        level: u32,
    },
    RemoveImprovement {
        improvement: ImprovementId,
        tile: TileId,
    },
    GrowPopulation {
        tile: TileId,
        city: CityId,
        amount: u32,
    },
    LosePopulation {
        city: CityId,
        amount: u32,
    },
    GainStars {
        tile: TileId,
        player: PlayerId,
        amount: u32,
    },
    /// Derived from population growth crossing a level threshold
    UpgradeCity {
        city: CityId,
        from_level: u32,
        threshold: u32,
    },
}

impl Consequence {
    /// True for city upgrades, which only ever come from a cascade. A
    /// `RemoveResource` may be cascade-derived too but is not flagged here.
    pub fn is_derived(&self) -> bool {
        matches!(self, Consequence::UpgradeCity { .. })
    }
}

impl fmt::Display for Consequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Consequence::RemoveResource { resource, tile } => {
                write!(f, "Remove {} from {}", resource, tile)
            }
            Consequence::ChangeTerrain { tile, terrain } => {
                write!(f, "Turn {} into {}", tile, terrain)
            }
            Consequence::BuildImprovement { tile, kind, level } => {
                write!(f, "Build {} (level {}) on {}", kind, level, tile)
            }
            Consequence::RemoveImprovement { improvement, tile } => {
                write!(f, "Remove {} from {}", improvement, tile)
            }
            Consequence::GrowPopulation { city, amount, .. } => {
                write!(f, "Grow {} population by {}", city, amount)
            }
            Consequence::LosePopulation { city, amount } => {
                write!(f, "Reduce {} population by {}", city, amount)
            }
            Consequence::GainStars { player, amount, .. } => {
                write!(f, "Credit {} stars to {}", amount, player)
            }
            Consequence::UpgradeCity { city, from_level, .. } => {
                write!(f, "Upgrade {} to level {}", city, from_level + 1)
            }
        }
    }
}
