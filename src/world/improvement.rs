//! Improvements built on tiles

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::{ImprovementId, TileId};

/// Type of improvement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImprovementType {
    Farm,
    Mine,
    LumberHut,
    Port,
    Sawmill,
    Forge,
    Windmill,
}

impl ImprovementType {
    pub const ALL: [ImprovementType; 7] = [
        ImprovementType::Farm,
        ImprovementType::Mine,
        ImprovementType::LumberHut,
        ImprovementType::Port,
        ImprovementType::Sawmill,
        ImprovementType::Forge,
        ImprovementType::Windmill,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ImprovementType::Farm => "Farm",
            ImprovementType::Mine => "Mine",
            ImprovementType::LumberHut => "Lumber Hut",
            ImprovementType::Port => "Port",
            ImprovementType::Sawmill => "Sawmill",
            ImprovementType::Forge => "Forge",
            ImprovementType::Windmill => "Windmill",
        }
    }
}

impl fmt::Display for ImprovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An improvement occupying a tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Improvement {
    pub id: ImprovementId,
    pub kind: ImprovementType,
    pub level: u32,
    pub tile: TileId,
}

impl fmt::Display for Improvement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
