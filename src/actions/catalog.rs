//! Action definitions and catalog
//!
//! One [`ActionKind`] per player activity. Each kind carries its row of
//! the rule matrix: the tech it needs, the subject it binds to, and the
//! structural precondition on that subject. Star costs and yields are
//! configurable and live in [`RulesConfig`](crate::core::config::RulesConfig).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::world::improvement::ImprovementType;
use crate::world::player::Tech;
use crate::world::resource::ResourceKind;
use crate::world::tile::TerrainType;

/// Unique action identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    HarvestFruit,
    Fishing,
    Hunting,
    Farming,
    Mining,
    Whaling,
    BuildLumberHut,
    BuildPort,
    ClearForest,
    BuildSawmill,
    BuildForge,
    BuildWindmill,
    DestroyImprovement,
}

/// Entity type an action binds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectKind {
    Resource,
    Tile,
    Improvement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCategory {
    Harvest,
    Construction,
    Terraform,
    Demolition,
}

impl ActionKind {
    pub const ALL: [ActionKind; 13] = [
        ActionKind::HarvestFruit,
        ActionKind::Fishing,
        ActionKind::Hunting,
        ActionKind::Farming,
        ActionKind::Mining,
        ActionKind::Whaling,
        ActionKind::BuildLumberHut,
        ActionKind::BuildPort,
        ActionKind::ClearForest,
        ActionKind::BuildSawmill,
        ActionKind::BuildForge,
        ActionKind::BuildWindmill,
        ActionKind::DestroyImprovement,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::HarvestFruit => "Harvest Fruit",
            ActionKind::Fishing => "Fishing",
            ActionKind::Hunting => "Hunting",
            ActionKind::Farming => "Farming",
            ActionKind::Mining => "Mining",
            ActionKind::Whaling => "Whaling",
            ActionKind::BuildLumberHut => "Build Lumber Hut",
            ActionKind::BuildPort => "Build Port",
            ActionKind::ClearForest => "Clear Forest",
            ActionKind::BuildSawmill => "Build Sawmill",
            ActionKind::BuildForge => "Build Forge",
            ActionKind::BuildWindmill => "Build Windmill",
            ActionKind::DestroyImprovement => "Destroy",
        }
    }

    /// The resource action offered for a resource of the given kind
    pub fn for_resource(kind: ResourceKind) -> ActionKind {
        match kind {
            ResourceKind::Fruit => ActionKind::HarvestFruit,
            ResourceKind::Crop => ActionKind::Farming,
            ResourceKind::Animal => ActionKind::Hunting,
            ResourceKind::Ore => ActionKind::Mining,
            ResourceKind::Fish => ActionKind::Fishing,
            ResourceKind::Whale => ActionKind::Whaling,
        }
    }

    pub fn category(&self) -> ActionCategory {
        match self {
            ActionKind::HarvestFruit
            | ActionKind::Fishing
            | ActionKind::Hunting
            | ActionKind::Whaling => ActionCategory::Harvest,
            ActionKind::Farming
            | ActionKind::Mining
            | ActionKind::BuildLumberHut
            | ActionKind::BuildPort
            | ActionKind::BuildSawmill
            | ActionKind::BuildForge
            | ActionKind::BuildWindmill => ActionCategory::Construction,
            ActionKind::ClearForest => ActionCategory::Terraform,
            ActionKind::DestroyImprovement => ActionCategory::Demolition,
        }
    }

    pub fn subject_kind(&self) -> SubjectKind {
        match self {
            ActionKind::HarvestFruit
            | ActionKind::Fishing
            | ActionKind::Hunting
            | ActionKind::Farming
            | ActionKind::Mining
            | ActionKind::Whaling => SubjectKind::Resource,
            ActionKind::BuildLumberHut
            | ActionKind::BuildPort
            | ActionKind::ClearForest
            | ActionKind::BuildSawmill
            | ActionKind::BuildForge
            | ActionKind::BuildWindmill => SubjectKind::Tile,
            ActionKind::DestroyImprovement => SubjectKind::Improvement,
        }
    }

    pub fn required_tech(&self) -> Tech {
        match self {
            ActionKind::HarvestFruit => Tech::Organization,
            ActionKind::Fishing => Tech::Fishing,
            ActionKind::Hunting => Tech::Hunting,
            ActionKind::Farming => Tech::Farming,
            ActionKind::Mining => Tech::Mining,
            ActionKind::Whaling => Tech::Whaling,
            ActionKind::BuildLumberHut => Tech::Forestry,
            ActionKind::BuildPort => Tech::Sailing,
            ActionKind::ClearForest => Tech::FreeSpirit,
            ActionKind::BuildSawmill => Tech::Mathematics,
            ActionKind::BuildForge => Tech::Smithery,
            ActionKind::BuildWindmill => Tech::Construction,
            ActionKind::DestroyImprovement => Tech::Construction,
        }
    }

    /// Terrain the subject tile must have (tile-bound kinds only)
    pub fn required_terrain(&self) -> Option<TerrainType> {
        match self {
            ActionKind::BuildLumberHut | ActionKind::ClearForest => Some(TerrainType::Forest),
            ActionKind::BuildPort => Some(TerrainType::Shore),
            ActionKind::BuildSawmill | ActionKind::BuildForge | ActionKind::BuildWindmill => {
                Some(TerrainType::Field)
            }
            _ => None,
        }
    }

    /// Improvement that must stand on an adjacent owned tile; its count
    /// there is the level of what gets built
    pub fn adjacency_requirement(&self) -> Option<ImprovementType> {
        match self {
            ActionKind::BuildSawmill => Some(ImprovementType::LumberHut),
            ActionKind::BuildForge => Some(ImprovementType::Mine),
            ActionKind::BuildWindmill => Some(ImprovementType::Farm),
            _ => None,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why an action is hidden from a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HiddenReason {
    /// Subject or player no longer exists
    UnknownSubject,
    MissingTech(Tech),
    NotOwned,
    WrongTerrain {
        expected: TerrainType,
        found: TerrainType,
    },
    /// Tile already holds an improvement
    Occupied,
    /// Tile is the site of a city
    CityCentre,
    NoAdjacent(ImprovementType),
}

impl fmt::Display for HiddenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HiddenReason::UnknownSubject => f.write_str("subject no longer exists"),
            HiddenReason::MissingTech(tech) => write!(f, "requires {:?}", tech),
            HiddenReason::NotOwned => f.write_str("tile is not in the player's territory"),
            HiddenReason::WrongTerrain { expected, found } => {
                write!(f, "requires {} terrain, found {}", expected, found)
            }
            HiddenReason::Occupied => f.write_str("tile already holds an improvement"),
            HiddenReason::CityCentre => f.write_str("tile is the site of a city"),
            HiddenReason::NoAdjacent(kind) => write!(f, "requires an adjacent {}", kind),
        }
    }
}

/// Result of checking an action against a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Legality {
    Hidden(HiddenReason),
    Unaffordable { cost: u32, stars: u32 },
    /// Blocked by another player's unit
    Inaccessible,
    Performable,
}

impl Legality {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Legality::Hidden(_))
    }

    pub fn is_performable(&self) -> bool {
        matches!(self, Legality::Performable)
    }

    pub fn reason(&self) -> Option<String> {
        match self {
            Legality::Performable => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Legality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Legality::Hidden(reason) => write!(f, "hidden: {}", reason),
            Legality::Unaffordable { cost, stars } => {
                write!(f, "costs {} stars, player has {}", cost, stars)
            }
            Legality::Inaccessible => f.write_str("tile is blocked by another player's unit"),
            Legality::Performable => f.write_str("performable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_adjacency_kinds_build_on_field() {
        for kind in ActionKind::ALL {
            if kind.adjacency_requirement().is_some() {
                assert_eq!(kind.required_terrain(), Some(TerrainType::Field));
                assert_eq!(kind.subject_kind(), SubjectKind::Tile);
            }
        }
    }

    #[test]
    fn test_terrain_preconditions_only_on_tile_kinds() {
        for kind in ActionKind::ALL {
            if kind.required_terrain().is_some() {
                assert_eq!(kind.subject_kind(), SubjectKind::Tile);
            }
        }
    }

    #[test]
    fn test_every_resource_kind_maps_to_a_resource_action() {
        let kinds = [
            ResourceKind::Fruit,
            ResourceKind::Crop,
            ResourceKind::Animal,
            ResourceKind::Ore,
            ResourceKind::Fish,
            ResourceKind::Whale,
        ];
        let mapped: HashSet<_> = kinds.into_iter().map(ActionKind::for_resource).collect();
        let resource_kinds: HashSet<_> = ActionKind::ALL
            .into_iter()
            .filter(|k| k.subject_kind() == SubjectKind::Resource)
            .collect();

        assert_eq!(mapped, resource_kinds);
        assert_eq!(ActionKind::for_resource(ResourceKind::Crop), ActionKind::Farming);
    }

    #[test]
    fn test_categories() {
        assert_eq!(ActionKind::Whaling.category(), ActionCategory::Harvest);
        assert_eq!(ActionKind::BuildForge.category(), ActionCategory::Construction);
        assert_eq!(ActionKind::ClearForest.category(), ActionCategory::Terraform);
        assert_eq!(
            ActionKind::DestroyImprovement.category(),
            ActionCategory::Demolition
        );
    }

    #[test]
    fn test_legality_flags() {
        let hidden = Legality::Hidden(HiddenReason::NotOwned);
        assert!(!hidden.is_visible());
        assert!(!hidden.is_performable());

        let poor = Legality::Unaffordable { cost: 5, stars: 4 };
        assert!(poor.is_visible());
        assert!(!poor.is_performable());
        assert_eq!(poor.reason().unwrap(), "costs 5 stars, player has 4");

        assert!(Legality::Performable.is_performable());
        assert_eq!(Legality::Performable.reason(), None);
    }
}
