//! Cities - population and level bookkeeping

use serde::{Deserialize, Serialize};

use crate::core::types::{CityId, PlayerId, TileId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub owner: PlayerId,
    /// Tile the city itself stands on
    pub tile: TileId,
    pub level: u32,
    pub population: u32,
}

impl City {
    pub fn new(id: CityId, name: impl Into<String>, owner: PlayerId, tile: TileId) -> Self {
        Self {
            id,
            name: name.into(),
            owner,
            tile,
            level: 1,
            population: 0,
        }
    }

    pub fn grow(&mut self, amount: u32) {
        self.population = self.population.saturating_add(amount);
    }

    /// Population never drops below zero
    pub fn shrink(&mut self, amount: u32) {
        self.population = self.population.saturating_sub(amount);
    }

    /// Spend `threshold` population to reach the next level
    pub fn upgrade(&mut self, threshold: u32) {
        self.population = self.population.saturating_sub(threshold);
        self.level += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_city_starts_at_level_one() {
        let city = City::new(CityId(1), "Lirio", PlayerId(1), TileId(0));
        assert_eq!(city.level, 1);
        assert_eq!(city.population, 0);
    }

    #[test]
    fn test_shrink_floors_at_zero() {
        let mut city = City::new(CityId(1), "Lirio", PlayerId(1), TileId(0));
        city.grow(2);
        city.shrink(5);
        assert_eq!(city.population, 0);
    }

    #[test]
    fn test_upgrade_carries_overflow() {
        let mut city = City::new(CityId(1), "Lirio", PlayerId(1), TileId(0));
        city.grow(3);
        city.upgrade(2);
        assert_eq!(city.level, 2);
        assert_eq!(city.population, 1);
    }
}
