//! Ordered consequence chains with eager cascade expansion

use ahash::AHashMap;
use serde::Serialize;

use crate::consequence::Consequence;
use crate::core::config::RulesConfig;
use crate::core::error::{Result, RulesError};
use crate::core::types::{CityId, TileId};
use crate::world::improvement::ImprovementType;
use crate::world::tile::Variation;
use crate::world::World;

/// City state as it will be once the chain so far is committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CityProjection {
    level: u32,
    population: u32,
}

/// Tile variation as it will be once the chain so far is committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TileProjection {
    /// Whatever the world holds there now (possibly nothing)
    Existing(Option<Variation>),
    /// An improvement built by the chain; its id is assigned on commit
    Planned(ImprovementType),
}

/// Projected state of every city and tile a chain touches
#[derive(Debug, Clone, Default)]
struct Projection {
    cities: AHashMap<CityId, CityProjection>,
    tiles: AHashMap<TileId, TileProjection>,
}

impl Projection {
    fn city(&self, world: &World, city: CityId) -> Result<CityProjection> {
        if let Some(projection) = self.cities.get(&city) {
            return Ok(*projection);
        }
        let city = world.city(city)?;
        Ok(CityProjection {
            level: city.level,
            population: city.population,
        })
    }

    fn tile(&self, world: &World, tile: TileId) -> Result<TileProjection> {
        if let Some(projection) = self.tiles.get(&tile) {
            return Ok(*projection);
        }
        Ok(TileProjection::Existing(world.tile(tile)?.variation))
    }

    /// Move the tile projection past one entry. Removals must find their
    /// subject still in place once the earlier entries are committed.
    fn advance_tile(&mut self, world: &World, consequence: &Consequence) -> Result<()> {
        match *consequence {
            Consequence::RemoveResource { resource, tile } => {
                world.resource(resource)?;
                let expected = TileProjection::Existing(Some(Variation::Resource(resource)));
                if self.tile(world, tile)? != expected {
                    return Err(RulesError::StaleConsequence(consequence.to_string()));
                }
                self.tiles.insert(tile, TileProjection::Existing(None));
            }
            Consequence::RemoveImprovement { improvement, tile } => {
                world.improvement(improvement)?;
                let expected = TileProjection::Existing(Some(Variation::Improvement(improvement)));
                if self.tile(world, tile)? != expected {
                    return Err(RulesError::StaleConsequence(consequence.to_string()));
                }
                self.tiles.insert(tile, TileProjection::Existing(None));
            }
            Consequence::BuildImprovement { tile, kind, .. } => {
                // Same-type improvements are upgraded in place and keep their id
                let next = match self.tile(world, tile)? {
                    TileProjection::Existing(Some(Variation::Improvement(id)))
                        if world.improvement(id).map_or(false, |i| i.kind == kind) =>
                    {
                        TileProjection::Existing(Some(Variation::Improvement(id)))
                    }
                    _ => TileProjection::Planned(kind),
                };
                self.tiles.insert(tile, next);
            }
            Consequence::ChangeTerrain { tile, .. } => {
                world.tile(tile)?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// The planned, totally ordered effects of one action
///
/// Entries commit in exactly the order they were logged, cascade-derived
/// ones included.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsequenceChain {
    entries: Vec<Consequence>,
    #[serde(skip)]
    projection: Projection,
}

impl PartialEq for ConsequenceChain {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for ConsequenceChain {}

impl ConsequenceChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a consequence and any consequences it directly implies.
    ///
    /// The world is only read; cascade decisions use the city and tile state
    /// projected through the entries already in the chain. A removal whose
    /// subject an earlier entry already took away is rejected and the chain
    /// is left as it was.
    pub fn log(&mut self, world: &World, config: &RulesConfig, consequence: Consequence) -> Result<()> {
        match consequence {
            Consequence::GrowPopulation { city, amount, .. } => {
                let mut projection = self.projection.city(world, city)?;
                self.entries.push(consequence);
                projection.population = projection.population.saturating_add(amount);

                while projection.level < config.city.max_level {
                    let threshold = config.city.level_up_threshold(projection.level);
                    if projection.population < threshold {
                        break;
                    }
                    let upgrade = Consequence::UpgradeCity {
                        city,
                        from_level: projection.level,
                        threshold,
                    };
                    tracing::debug!("Cascade: {}", upgrade);
                    self.entries.push(upgrade);
                    projection.population -= threshold;
                    projection.level += 1;
                }
                self.projection.cities.insert(city, projection);
            }
            Consequence::LosePopulation { city, amount } => {
                let mut projection = self.projection.city(world, city)?;
                let lost = amount.min(projection.population);
                if lost < amount {
                    tracing::debug!(
                        "Population loss on {} clamped from {} to {}",
                        city,
                        amount,
                        lost
                    );
                }
                projection.population -= lost;
                self.projection.cities.insert(city, projection);
                self.entries.push(Consequence::LosePopulation { city, amount: lost });
            }
            Consequence::UpgradeCity { city, threshold, .. } => {
                let mut projection = self.projection.city(world, city)?;
                projection.population = projection.population.saturating_sub(threshold);
                projection.level = projection.level.saturating_add(1);
                self.projection.cities.insert(city, projection);
                self.entries.push(consequence);
            }
            Consequence::ChangeTerrain { tile, terrain } => {
                // A resource that cannot exist on the new terrain goes with it
                let stranded = match self.projection.tile(world, tile)? {
                    TileProjection::Existing(Some(Variation::Resource(resource))) => {
                        let native = world.resource(resource)?.kind.native_terrain();
                        (native != terrain).then_some(resource)
                    }
                    _ => None,
                };
                self.entries.push(consequence);

                if let Some(resource) = stranded {
                    let removal = Consequence::RemoveResource { resource, tile };
                    tracing::debug!("Cascade: {}", removal);
                    self.projection
                        .tiles
                        .insert(tile, TileProjection::Existing(None));
                    self.entries.push(removal);
                }
            }
            other => {
                self.projection.advance_tile(world, &other)?;
                self.entries.push(other);
            }
        }
        Ok(())
    }

    /// Check that every entry still applies to `world` once the entries
    /// before it are committed
    pub fn verify(&self, world: &World) -> Result<()> {
        let mut projection = Projection::default();
        for entry in &self.entries {
            projection.advance_tile(world, entry)?;
            match *entry {
                Consequence::GrowPopulation { tile, city, .. } => {
                    world.tile(tile)?;
                    world.city(city)?;
                }
                Consequence::LosePopulation { city, .. }
                | Consequence::UpgradeCity { city, .. } => {
                    world.city(city)?;
                }
                Consequence::GainStars { tile, player, .. } => {
                    world.tile(tile)?;
                    world.player(player)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn from_entries(entries: Vec<Consequence>) -> Self {
        Self {
            entries,
            projection: Projection::default(),
        }
    }

    pub fn entries(&self) -> &[Consequence] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Consequence> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<Consequence> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a ConsequenceChain {
    type Item = &'a Consequence;
    type IntoIter = std::slice::Iter<'a, Consequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
