//! Committing planned chains to the world

use crate::consequence::{Consequence, ConsequenceChain};
use crate::core::error::Result;
use crate::world::World;

/// Apply every consequence of the chain to the world, in order.
///
/// Every entry is checked up front against the world as the entries before
/// it will leave it, so a chain is either committed in full or not at all.
pub fn commit(world: &mut World, chain: &ConsequenceChain) -> Result<()> {
    chain.verify(world)?;
    for consequence in chain {
        apply_consequence(world, consequence)?;
        tracing::debug!("Committed: {}", consequence);
    }
    Ok(())
}

fn apply_consequence(world: &mut World, consequence: &Consequence) -> Result<()> {
    match *consequence {
        Consequence::RemoveResource { resource, .. } => {
            world.remove_resource(resource)?;
        }
        Consequence::ChangeTerrain { tile, terrain } => world.set_terrain(tile, terrain)?,
        Consequence::BuildImprovement { tile, kind, level } => {
            world.build_improvement(tile, kind, level)?;
        }
        Consequence::RemoveImprovement { improvement, .. } => {
            world.remove_improvement(improvement)?;
        }
        Consequence::GrowPopulation { city, amount, .. } => world.grow_population(city, amount)?,
        Consequence::LosePopulation { city, amount } => world.lose_population(city, amount)?,
        Consequence::GainStars { player, amount, .. } => world.add_stars(player, amount)?,
        Consequence::UpgradeCity { city, threshold, .. } => world.upgrade_city(city, threshold)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RulesConfig;
    use crate::core::error::RulesError;
    use crate::core::types::{CityId, PlayerId, TileId};
    use crate::world::{ImprovementType, ResourceKind, TerrainType};

    fn fixture() -> (World, PlayerId, CityId, TileId) {
        let mut world = World::new(5, 5, TerrainType::Field);
        let player = world.add_player("Kickoo", 3);
        let city = world.found_city(player, "Capital", 2, 2).unwrap();
        let tile = world.map.tile_id(1, 1).unwrap();
        (world, player, city, tile)
    }

    #[test]
    fn test_commit_growth_and_upgrade() {
        let (mut world, _, city, tile) = fixture();
        let config = RulesConfig::default();
        let mut chain = ConsequenceChain::new();
        chain
            .log(&world, &config, Consequence::GrowPopulation { tile, city, amount: 3 })
            .unwrap();

        commit(&mut world, &chain).unwrap();
        let city = world.city(city).unwrap();
        assert_eq!(city.level, 2);
        assert_eq!(city.population, 1);
    }

    #[test]
    fn test_commit_build_then_grow_in_order() {
        let (mut world, _, city, tile) = fixture();
        world.place_resource(tile, ResourceKind::Crop).unwrap();
        let config = RulesConfig::default();
        let mut chain = ConsequenceChain::new();
        chain
            .log(
                &world,
                &config,
                Consequence::BuildImprovement {
                    tile,
                    kind: ImprovementType::Farm,
                    level: 1,
                },
            )
            .unwrap();
        chain
            .log(&world, &config, Consequence::GrowPopulation { tile, city, amount: 1 })
            .unwrap();

        commit(&mut world, &chain).unwrap();
        assert_eq!(
            world.improvement_on(tile).map(|i| i.kind),
            Some(ImprovementType::Farm)
        );
        assert_eq!(world.city(city).unwrap().population, 1);
    }

    #[test]
    fn test_commit_gain_stars() {
        let (mut world, player, _, tile) = fixture();
        let config = RulesConfig::default();
        let mut chain = ConsequenceChain::new();
        chain
            .log(&world, &config, Consequence::GainStars { tile, player, amount: 10 })
            .unwrap();

        commit(&mut world, &chain).unwrap();
        assert_eq!(world.player(player).unwrap().stars(), 13);
    }

    #[test]
    fn test_stale_chain_is_rejected_without_mutation() {
        let (mut world, player, _, tile) = fixture();
        let fruit = world.place_resource(tile, ResourceKind::Fruit).unwrap();
        let config = RulesConfig::default();
        let mut chain = ConsequenceChain::new();
        chain
            .log(&world, &config, Consequence::GainStars { tile, player, amount: 2 })
            .unwrap();
        chain
            .log(
                &world,
                &config,
                Consequence::RemoveResource {
                    resource: fruit,
                    tile,
                },
            )
            .unwrap();

        // Harvested by someone else between planning and commit
        world.remove_resource(fruit).unwrap();
        let before = world.clone();
        let result = commit(&mut world, &chain);
        assert!(matches!(result, Err(RulesError::UnknownResource(_))));
        assert_eq!(world, before);
    }

    #[test]
    fn test_removal_after_replacing_build_fails_before_any_change() {
        let (mut world, _, _, tile) = fixture();
        let crop = world.place_resource(tile, ResourceKind::Crop).unwrap();
        let chain = ConsequenceChain::from_entries(vec![
            Consequence::BuildImprovement {
                tile,
                kind: ImprovementType::Farm,
                level: 1,
            },
            Consequence::ChangeTerrain {
                tile,
                terrain: TerrainType::Forest,
            },
            Consequence::RemoveResource {
                resource: crop,
                tile,
            },
        ]);

        let before = world.clone();
        let result = commit(&mut world, &chain);
        assert!(matches!(result, Err(RulesError::StaleConsequence(_))));
        assert_eq!(world, before);
        assert_eq!(world.tile(tile).unwrap().terrain, TerrainType::Field);
    }
}
