//! Actions bound to a subject: legality, planning and application

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::actions::catalog::{ActionKind, HiddenReason, Legality, SubjectKind};
use crate::consequence::{self, Consequence, ConsequenceChain};
use crate::core::config::RulesConfig;
use crate::core::error::{Result, RulesError};
use crate::core::types::{ImprovementId, PlayerId, ResourceId, TileId};
use crate::world::improvement::ImprovementType;
use crate::world::tile::{Tile, TerrainType, Variation};
use crate::world::World;

/// The entity an action operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    Resource(ResourceId),
    Tile(TileId),
    Improvement(ImprovementId),
}

impl Subject {
    pub fn kind(&self) -> SubjectKind {
        match self {
            Subject::Resource(_) => SubjectKind::Resource,
            Subject::Tile(_) => SubjectKind::Tile,
            Subject::Improvement(_) => SubjectKind::Improvement,
        }
    }

    /// Tile the subject stands on
    pub fn tile(&self, world: &World) -> Result<TileId> {
        match *self {
            Subject::Resource(id) => Ok(world.resource(id)?.tile),
            Subject::Tile(id) => Ok(world.tile(id)?.id),
            Subject::Improvement(id) => Ok(world.improvement(id)?.tile),
        }
    }
}

impl From<Variation> for Subject {
    fn from(variation: Variation) -> Self {
        match variation {
            Variation::Resource(id) => Subject::Resource(id),
            Variation::Improvement(id) => Subject::Improvement(id),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Resource(id) => write!(f, "{}", id),
            Subject::Tile(id) => write!(f, "{}", id),
            Subject::Improvement(id) => write!(f, "{}", id),
        }
    }
}

/// A player activity bound to one subject
///
/// Actions hold only ids; they are cheap to build while enumerating a
/// player's options and carry no state of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    kind: ActionKind,
    subject: Subject,
}

impl Action {
    /// Bind an action kind to a subject of the matching type
    pub fn new(kind: ActionKind, subject: Subject) -> Result<Self> {
        if kind.subject_kind() != subject.kind() {
            return Err(RulesError::SubjectMismatch {
                action: kind.to_string(),
                subject: subject.to_string(),
            });
        }
        Ok(Self { kind, subject })
    }

    /// Actions worth offering on this subject: the one action matching a
    /// resource's kind, or every kind binding to tiles and improvements
    pub fn candidates(world: &World, subject: Subject) -> Vec<Action> {
        match subject {
            Subject::Resource(id) => world
                .resource(id)
                .map(|resource| Action {
                    kind: ActionKind::for_resource(resource.kind),
                    subject,
                })
                .into_iter()
                .collect(),
            _ => ActionKind::ALL
                .into_iter()
                .filter(|kind| kind.subject_kind() == subject.kind())
                .map(|kind| Action { kind, subject })
                .collect(),
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn subject(&self) -> Subject {
        self.subject
    }

    pub fn cost(&self, config: &RulesConfig) -> u32 {
        config.costs.cost(self.kind)
    }

    /// Full legality check; visibility clauses first, then affordability
    /// and accessibility
    pub fn check(&self, world: &World, config: &RulesConfig, player: PlayerId) -> Legality {
        let (Ok(acting), Ok(tile)) = (
            world.player(player),
            self.subject.tile(world).and_then(|id| world.tile(id)),
        ) else {
            return Legality::Hidden(HiddenReason::UnknownSubject);
        };

        let tech = self.kind.required_tech();
        if !acting.has_tech(tech) {
            return Legality::Hidden(HiddenReason::MissingTech(tech));
        }
        if !world.is_owned_by(tile.id, player) {
            return Legality::Hidden(HiddenReason::NotOwned);
        }
        if let Some(reason) = self.structural_violation(world, tile, player) {
            return Legality::Hidden(reason);
        }

        let cost = self.cost(config);
        if acting.stars() < cost {
            return Legality::Unaffordable {
                cost,
                stars: acting.stars(),
            };
        }
        if !tile.is_accessible_to(player) {
            return Legality::Inaccessible;
        }
        Legality::Performable
    }

    fn structural_violation(
        &self,
        world: &World,
        tile: &Tile,
        player: PlayerId,
    ) -> Option<HiddenReason> {
        if self.kind.subject_kind() != SubjectKind::Tile {
            return None;
        }
        if let Some(expected) = self.kind.required_terrain() {
            if tile.terrain != expected {
                return Some(HiddenReason::WrongTerrain {
                    expected,
                    found: tile.terrain,
                });
            }
        }
        if !tile.is_buildable() {
            return Some(HiddenReason::Occupied);
        }
        if world.is_city_centre(tile.id) {
            return Some(HiddenReason::CityCentre);
        }
        if let Some(neighbour) = self.kind.adjacency_requirement() {
            if adjacent_count(world, tile.id, player, neighbour) == 0 {
                return Some(HiddenReason::NoAdjacent(neighbour));
            }
        }
        None
    }

    pub fn is_visible_to(&self, world: &World, config: &RulesConfig, player: PlayerId) -> bool {
        self.check(world, config, player).is_visible()
    }

    pub fn is_performable_to(&self, world: &World, config: &RulesConfig, player: PlayerId) -> bool {
        self.check(world, config, player).is_performable()
    }

    /// Plan the full consequence chain of performing this action.
    ///
    /// Pure: the world is only read. Adjacency-driven levels are a snapshot
    /// of the world at call time.
    pub fn consequences(
        &self,
        world: &World,
        config: &RulesConfig,
        player: PlayerId,
    ) -> Result<ConsequenceChain> {
        let tile = world.tile(self.subject.tile(world)?)?;
        let mut chain = ConsequenceChain::new();

        match (self.kind, self.subject) {
            (
                ActionKind::HarvestFruit | ActionKind::Fishing | ActionKind::Hunting,
                Subject::Resource(resource),
            ) => {
                chain.log(world, config, Consequence::RemoveResource { resource, tile: tile.id })?;
                log_growth(&mut chain, world, config, tile, config.yields.harvest_population)?;
            }
            (ActionKind::Farming, Subject::Resource(_)) => {
                log_build(&mut chain, world, config, tile, ImprovementType::Farm, 1)?;
            }
            (ActionKind::Mining, Subject::Resource(_)) => {
                log_build(&mut chain, world, config, tile, ImprovementType::Mine, 1)?;
            }
            (ActionKind::Whaling, Subject::Resource(resource)) => {
                chain.log(world, config, Consequence::RemoveResource { resource, tile: tile.id })?;
                chain.log(
                    world,
                    config,
                    Consequence::GainStars {
                        tile: tile.id,
                        player,
                        amount: config.yields.whaling_stars,
                    },
                )?;
            }
            (ActionKind::BuildLumberHut, Subject::Tile(_)) => {
                log_build(&mut chain, world, config, tile, ImprovementType::LumberHut, 1)?;
            }
            (ActionKind::BuildPort, Subject::Tile(_)) => {
                log_build(&mut chain, world, config, tile, ImprovementType::Port, 1)?;
            }
            (ActionKind::ClearForest, Subject::Tile(_)) => {
                chain.log(
                    world,
                    config,
                    Consequence::ChangeTerrain {
                        tile: tile.id,
                        terrain: TerrainType::Field,
                    },
                )?;
                chain.log(
                    world,
                    config,
                    Consequence::GainStars {
                        tile: tile.id,
                        player,
                        amount: config.yields.clear_forest_stars,
                    },
                )?;
            }
            (ActionKind::BuildSawmill, Subject::Tile(_)) => {
                let level = adjacent_count(world, tile.id, player, ImprovementType::LumberHut);
                log_build(&mut chain, world, config, tile, ImprovementType::Sawmill, level)?;
            }
            (ActionKind::BuildForge, Subject::Tile(_)) => {
                let level = adjacent_count(world, tile.id, player, ImprovementType::Mine);
                log_build(&mut chain, world, config, tile, ImprovementType::Forge, level)?;
            }
            (ActionKind::BuildWindmill, Subject::Tile(_)) => {
                let level = adjacent_count(world, tile.id, player, ImprovementType::Farm);
                log_build(&mut chain, world, config, tile, ImprovementType::Windmill, level)?;
            }
            (ActionKind::DestroyImprovement, Subject::Improvement(id)) => {
                let improvement = world.improvement(id)?;
                chain.log(
                    world,
                    config,
                    Consequence::RemoveImprovement {
                        improvement: id,
                        tile: tile.id,
                    },
                )?;
                if let Some(city) = tile.owner_city {
                    let amount = config
                        .improvements
                        .base_value(improvement.kind)
                        .saturating_mul(improvement.level);
                    chain.log(world, config, Consequence::LosePopulation { city, amount })?;
                }
            }
            (kind, subject) => {
                return Err(RulesError::SubjectMismatch {
                    action: kind.to_string(),
                    subject: subject.to_string(),
                });
            }
        }

        tracing::debug!(
            "Planned {} on {} for {}: {} consequences",
            self.kind,
            self.subject,
            player,
            chain.len()
        );
        Ok(chain)
    }

    /// Re-check legality, deduct the cost once and commit a freshly planned chain
    pub fn apply(
        &self,
        world: &mut World,
        config: &RulesConfig,
        player: PlayerId,
    ) -> Result<ConsequenceChain> {
        let legality = self.check(world, config, player);
        if !legality.is_performable() {
            tracing::warn!("Refused {} on {} for {}: {}", self.kind, self.subject, player, legality);
            return Err(RulesError::NotPerformable {
                action: self.kind.to_string(),
                reason: legality.to_string(),
            });
        }
        self.apply_unchecked(world, config, player)
    }

    /// Deduct the cost and commit without re-checking legality.
    ///
    /// Only for callers that validated within the same turn; a stale subject
    /// can leave the player short of stars (floored at zero).
    pub fn apply_unchecked(
        &self,
        world: &mut World,
        config: &RulesConfig,
        player: PlayerId,
    ) -> Result<ConsequenceChain> {
        let chain = self.consequences(world, config, player)?;
        chain.verify(world)?;

        let cost = self.cost(config);
        if !world.player_mut(player)?.spend(cost) {
            tracing::warn!("{} could not cover {} stars for {}", player, cost, self.kind);
        }
        consequence::commit(world, &chain)?;

        tracing::info!(
            "{} applied {} on {} for {} stars ({} consequences)",
            player,
            self.kind,
            self.subject,
            cost,
            chain.len()
        );
        Ok(chain)
    }

    /// Human-readable name, resolving the subject where it matters
    pub fn describe(&self, world: &World) -> String {
        match self.subject {
            Subject::Improvement(id) => match world.improvement(id) {
                Ok(improvement) => format!("{} {}", self.kind.label(), improvement),
                Err(_) => self.to_string(),
            },
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ActionKind::DestroyImprovement => write!(f, "Destroy {}", self.subject),
            kind => f.write_str(kind.label()),
        }
    }
}

/// Owned tiles around `tile` holding an improvement of the given type
fn adjacent_count(world: &World, tile: TileId, player: PlayerId, kind: ImprovementType) -> u32 {
    world
        .inner_ring(tile)
        .into_iter()
        .filter(|t| world.is_owned_by(t.id, player))
        .filter(|t| world.improvement_on(t.id).map_or(false, |i| i.kind == kind))
        .count() as u32
}

fn log_growth(
    chain: &mut ConsequenceChain,
    world: &World,
    config: &RulesConfig,
    tile: &Tile,
    amount: u32,
) -> Result<()> {
    match tile.owner_city {
        Some(city) => chain.log(
            world,
            config,
            Consequence::GrowPopulation {
                tile: tile.id,
                city,
                amount,
            },
        ),
        None => {
            tracing::debug!("{} has no city, growth of {} dropped", tile.id, amount);
            Ok(())
        }
    }
}

fn log_build(
    chain: &mut ConsequenceChain,
    world: &World,
    config: &RulesConfig,
    tile: &Tile,
    kind: ImprovementType,
    level: u32,
) -> Result<()> {
    chain.log(
        world,
        config,
        Consequence::BuildImprovement {
            tile: tile.id,
            kind,
            level,
        },
    )?;
    let amount = level.saturating_mul(config.improvements.base_value(kind));
    log_growth(chain, world, config, tile, amount)
}

/// Every action visible to `player` across the tiles of its territory
pub fn available_actions(world: &World, config: &RulesConfig, player: PlayerId) -> Vec<Action> {
    world
        .tiles()
        .filter(|tile| world.is_owned_by(tile.id, player))
        .flat_map(|tile| {
            let mut subjects = vec![Subject::Tile(tile.id)];
            subjects.extend(tile.variation.map(Subject::from));
            subjects
        })
        .flat_map(|subject| Action::candidates(world, subject))
        .filter(|action| action.is_visible_to(world, config, player))
        .collect()
}
