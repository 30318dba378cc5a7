//! World model - tiles, players, cities and tile variations
//!
//! The world is passed explicitly to every rules query. Read accessors are
//! used while planning; the mutators further down are only meant to be
//! driven by committing a consequence chain (plus fixture setup).

pub mod city;
pub mod improvement;
pub mod map;
pub mod player;
pub mod resource;
pub mod tile;

pub use city::City;
pub use improvement::{Improvement, ImprovementType};
pub use map::TileMap;
pub use player::{Player, Tech};
pub use resource::{Resource, ResourceKind};
pub use tile::{TerrainType, Tile, Variation};

use ahash::AHashMap;

use crate::core::error::{Result, RulesError};
use crate::core::types::{CityId, ImprovementId, PlayerId, ResourceId, TileId};

/// The game world the rules core reads and mutates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    pub map: TileMap,
    tiles: Vec<Tile>,
    players: AHashMap<PlayerId, Player>,
    cities: AHashMap<CityId, City>,
    resources: AHashMap<ResourceId, Resource>,
    improvements: AHashMap<ImprovementId, Improvement>,
    next_id: u32,
}

impl World {
    /// Create a map of the given size filled with one terrain type
    pub fn new(width: u32, height: u32, terrain: TerrainType) -> Self {
        let map = TileMap::new(width, height);
        let tiles = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| Tile::new(TileId(y * width + x), x, y, terrain))
            .collect();

        Self {
            map,
            tiles,
            players: AHashMap::new(),
            cities: AHashMap::new(),
            resources: AHashMap::new(),
            improvements: AHashMap::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // === READ ACCESS ===

    pub fn tile(&self, id: TileId) -> Result<&Tile> {
        self.tiles.get(id.index()).ok_or(RulesError::UnknownTile(id))
    }

    fn tile_mut(&mut self, id: TileId) -> Result<&mut Tile> {
        self.tiles.get_mut(id.index()).ok_or(RulesError::UnknownTile(id))
    }

    pub fn tile_at(&self, x: u32, y: u32) -> Option<&Tile> {
        self.map.tile_id(x, y).and_then(|id| self.tiles.get(id.index()))
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players.get(&id).ok_or(RulesError::UnknownPlayer(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players.get_mut(&id).ok_or(RulesError::UnknownPlayer(id))
    }

    pub fn city(&self, id: CityId) -> Result<&City> {
        self.cities.get(&id).ok_or(RulesError::UnknownCity(id))
    }

    fn city_mut(&mut self, id: CityId) -> Result<&mut City> {
        self.cities.get_mut(&id).ok_or(RulesError::UnknownCity(id))
    }

    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    pub fn resource(&self, id: ResourceId) -> Result<&Resource> {
        self.resources.get(&id).ok_or(RulesError::UnknownResource(id))
    }

    pub fn improvement(&self, id: ImprovementId) -> Result<&Improvement> {
        self.improvements
            .get(&id)
            .ok_or(RulesError::UnknownImprovement(id))
    }

    /// Improvement currently standing on a tile, if any
    pub fn improvement_on(&self, tile: TileId) -> Option<&Improvement> {
        self.tile(tile)
            .ok()
            .and_then(|t| t.improvement())
            .and_then(|id| self.improvements.get(&id))
    }

    /// Whether the tile lies in the territory of one of the player's cities
    pub fn is_owned_by(&self, tile: TileId, player: PlayerId) -> bool {
        self.tile(tile)
            .ok()
            .and_then(|t| t.owner_city)
            .and_then(|city| self.cities.get(&city))
            .map_or(false, |city| city.owner == player)
    }

    /// Whether a city stands on the tile itself
    pub fn is_city_centre(&self, tile: TileId) -> bool {
        self.tile(tile)
            .ok()
            .and_then(|t| t.owner_city)
            .and_then(|city| self.cities.get(&city))
            .map_or(false, |city| city.tile == tile)
    }

    /// Tiles adjacent to the given tile
    pub fn inner_ring(&self, tile: TileId) -> Vec<&Tile> {
        match self.map.coords(tile) {
            Some((x, y)) => self
                .map
                .inner_ring(x, y)
                .into_iter()
                .filter_map(|id| self.tiles.get(id.index()))
                .collect(),
            None => Vec::new(),
        }
    }

    // === FIXTURE SETUP ===

    pub fn add_player(&mut self, name: impl Into<String>, stars: u32) -> PlayerId {
        let id = PlayerId(self.allocate_id());
        let mut player = Player::new(id, name);
        player.set_stars(stars);
        self.players.insert(id, player);
        id
    }

    /// Found a city at (x, y), claiming its tile and every unclaimed neighbour
    pub fn found_city(
        &mut self,
        owner: PlayerId,
        name: impl Into<String>,
        x: u32,
        y: u32,
    ) -> Result<CityId> {
        self.player(owner)?;
        let tile = self.map.tile_id(x, y).ok_or(RulesError::OutOfBounds(x, y))?;
        let id = CityId(self.allocate_id());
        self.cities.insert(id, City::new(id, name, owner, tile));

        self.tile_mut(tile)?.owner_city = Some(id);
        for neighbour in self.map.inner_ring(x, y) {
            let neighbour = self.tile_mut(neighbour)?;
            if neighbour.owner_city.is_none() {
                neighbour.owner_city = Some(id);
            }
        }

        tracing::debug!("Founded {} for {} at ({}, {})", id, owner, x, y);
        Ok(id)
    }

    /// Assign a tile to a city's territory (or release it with `None`)
    pub fn claim_tile(&mut self, tile: TileId, city: Option<CityId>) -> Result<()> {
        if let Some(city) = city {
            self.city(city)?;
        }
        self.tile_mut(tile)?.owner_city = city;
        Ok(())
    }

    pub fn occupy(&mut self, tile: TileId, occupant: Option<PlayerId>) -> Result<()> {
        self.tile_mut(tile)?.occupant = occupant;
        Ok(())
    }

    pub fn set_city_population(&mut self, city: CityId, level: u32, population: u32) -> Result<()> {
        let city = self.city_mut(city)?;
        city.level = level;
        city.population = population;
        Ok(())
    }

    /// Put a resource on a tile, replacing whatever was there
    pub fn place_resource(&mut self, tile: TileId, kind: ResourceKind) -> Result<ResourceId> {
        self.clear_variation(tile)?;
        let id = ResourceId(self.allocate_id());
        self.resources.insert(id, Resource { id, kind, tile });
        self.tile_mut(tile)?.variation = Some(Variation::Resource(id));
        Ok(id)
    }

    /// Put an improvement on a tile, replacing whatever was there
    pub fn place_improvement(
        &mut self,
        tile: TileId,
        kind: ImprovementType,
        level: u32,
    ) -> Result<ImprovementId> {
        self.clear_variation(tile)?;
        let id = ImprovementId(self.allocate_id());
        self.improvements.insert(id, Improvement { id, kind, level, tile });
        self.tile_mut(tile)?.variation = Some(Variation::Improvement(id));
        Ok(id)
    }

    fn clear_variation(&mut self, tile: TileId) -> Result<()> {
        match self.tile_mut(tile)?.variation.take() {
            Some(Variation::Resource(id)) => {
                self.resources.remove(&id);
            }
            Some(Variation::Improvement(id)) => {
                self.improvements.remove(&id);
            }
            None => {}
        }
        Ok(())
    }

    // === COMMIT MUTATORS ===

    pub fn set_terrain(&mut self, tile: TileId, terrain: TerrainType) -> Result<()> {
        self.tile_mut(tile)?.terrain = terrain;
        Ok(())
    }

    /// Detach a resource from its tile
    pub fn remove_resource(&mut self, id: ResourceId) -> Result<Resource> {
        let resource = self
            .resources
            .remove(&id)
            .ok_or(RulesError::UnknownResource(id))?;
        let tile = self.tile_mut(resource.tile)?;
        if tile.variation == Some(Variation::Resource(id)) {
            tile.variation = None;
        }
        Ok(resource)
    }

    /// Build an improvement, or upgrade the one of the same type already standing here
    pub fn build_improvement(
        &mut self,
        tile: TileId,
        kind: ImprovementType,
        level: u32,
    ) -> Result<ImprovementId> {
        if let Some(id) = self.tile(tile)?.improvement() {
            if let Some(existing) = self.improvements.get_mut(&id) {
                if existing.kind == kind {
                    existing.level = level;
                    return Ok(id);
                }
            }
        }
        self.place_improvement(tile, kind, level)
    }

    /// Detach an improvement from its tile
    pub fn remove_improvement(&mut self, id: ImprovementId) -> Result<Improvement> {
        let improvement = self
            .improvements
            .remove(&id)
            .ok_or(RulesError::UnknownImprovement(id))?;
        let tile = self.tile_mut(improvement.tile)?;
        if tile.variation == Some(Variation::Improvement(id)) {
            tile.variation = None;
        }
        Ok(improvement)
    }

    pub fn grow_population(&mut self, city: CityId, amount: u32) -> Result<()> {
        self.city_mut(city)?.grow(amount);
        Ok(())
    }

    pub fn lose_population(&mut self, city: CityId, amount: u32) -> Result<()> {
        self.city_mut(city)?.shrink(amount);
        Ok(())
    }

    pub fn upgrade_city(&mut self, city: CityId, threshold: u32) -> Result<()> {
        self.city_mut(city)?.upgrade(threshold);
        Ok(())
    }

    pub fn add_stars(&mut self, player: PlayerId, amount: u32) -> Result<()> {
        self.player_mut(player)?.add_stars(amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_city() -> (World, PlayerId, CityId) {
        let mut world = World::new(6, 6, TerrainType::Field);
        let player = world.add_player("Bardur", 0);
        let city = world.found_city(player, "Capital", 2, 2).unwrap();
        (world, player, city)
    }

    #[test]
    fn test_found_city_claims_inner_ring() {
        let (world, player, city) = world_with_city();
        let owned: Vec<_> = world
            .tiles()
            .filter(|t| t.owner_city == Some(city))
            .collect();
        assert_eq!(owned.len(), 9);

        let center = world.map.tile_id(2, 2).unwrap();
        let far = world.map.tile_id(5, 5).unwrap();
        assert!(world.is_owned_by(center, player));
        assert!(!world.is_owned_by(far, player));
    }

    #[test]
    fn test_city_centre_is_only_the_founding_tile() {
        let (world, _, _) = world_with_city();
        assert!(world.is_city_centre(world.map.tile_id(2, 2).unwrap()));
        assert!(!world.is_city_centre(world.map.tile_id(1, 2).unwrap()));
        assert!(!world.is_city_centre(world.map.tile_id(5, 5).unwrap()));
    }

    #[test]
    fn test_found_city_keeps_existing_claims() {
        let (mut world, _, first) = world_with_city();
        let rival = world.add_player("Oumaji", 0);
        let second = world.found_city(rival, "Outpost", 4, 2).unwrap();

        let shared = world.map.tile_id(3, 2).unwrap();
        assert_eq!(world.tile(shared).unwrap().owner_city, Some(first));
        let fresh = world.map.tile_id(5, 2).unwrap();
        assert_eq!(world.tile(fresh).unwrap().owner_city, Some(second));
    }

    #[test]
    fn test_found_city_out_of_bounds() {
        let (mut world, player, _) = world_with_city();
        let result = world.found_city(player, "Nowhere", 10, 10);
        assert!(matches!(result, Err(RulesError::OutOfBounds(10, 10))));
    }

    #[test]
    fn test_remove_resource_clears_tile() {
        let (mut world, _, _) = world_with_city();
        let tile = world.map.tile_id(1, 1).unwrap();
        let resource = world.place_resource(tile, ResourceKind::Fruit).unwrap();

        world.remove_resource(resource).unwrap();
        assert_eq!(world.tile(tile).unwrap().variation, None);
        assert!(world.resource(resource).is_err());
    }

    #[test]
    fn test_build_improvement_replaces_resource() {
        let (mut world, _, _) = world_with_city();
        let tile = world.map.tile_id(1, 1).unwrap();
        let resource = world.place_resource(tile, ResourceKind::Crop).unwrap();

        let farm = world.build_improvement(tile, ImprovementType::Farm, 1).unwrap();
        assert!(world.resource(resource).is_err());
        assert_eq!(world.improvement_on(tile).map(|i| i.id), Some(farm));
    }

    #[test]
    fn test_build_improvement_upgrades_same_type() {
        let (mut world, _, _) = world_with_city();
        let tile = world.map.tile_id(1, 1).unwrap();
        let sawmill = world.place_improvement(tile, ImprovementType::Sawmill, 1).unwrap();

        let rebuilt = world.build_improvement(tile, ImprovementType::Sawmill, 3).unwrap();
        assert_eq!(rebuilt, sawmill);
        assert_eq!(world.improvement(sawmill).unwrap().level, 3);
    }

    #[test]
    fn test_remove_improvement() {
        let (mut world, _, _) = world_with_city();
        let tile = world.map.tile_id(1, 2).unwrap();
        let mine = world.place_improvement(tile, ImprovementType::Mine, 1).unwrap();

        let removed = world.remove_improvement(mine).unwrap();
        assert_eq!(removed.kind, ImprovementType::Mine);
        assert!(world.improvement_on(tile).is_none());
        assert!(matches!(
            world.remove_improvement(mine),
            Err(RulesError::UnknownImprovement(_))
        ));
    }

    #[test]
    fn test_inner_ring_of_corner_tile() {
        let (world, _, _) = world_with_city();
        let corner = world.map.tile_id(0, 0).unwrap();
        assert_eq!(world.inner_ring(corner).len(), 3);
    }
}
