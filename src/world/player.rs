//! Players, their star treasury and unlocked techs

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::types::PlayerId;

/// Unlockable capability gating which actions a player can see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tech {
    Organization,
    Fishing,
    Hunting,
    Farming,
    Mining,
    Whaling,
    Forestry,
    Sailing,
    FreeSpirit,
    Mathematics,
    Smithery,
    Construction,
    Riding,
    Climbing,
}

impl Tech {
    pub const ALL: [Tech; 14] = [
        Tech::Organization,
        Tech::Fishing,
        Tech::Hunting,
        Tech::Farming,
        Tech::Mining,
        Tech::Whaling,
        Tech::Forestry,
        Tech::Sailing,
        Tech::FreeSpirit,
        Tech::Mathematics,
        Tech::Smithery,
        Tech::Construction,
        Tech::Riding,
        Tech::Climbing,
    ];
}

/// A player with a star treasury and a tech set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    stars: u32,
    techs: AHashSet<Tech>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            stars: 0,
            techs: AHashSet::new(),
        }
    }

    pub fn stars(&self) -> u32 {
        self.stars
    }

    pub fn set_stars(&mut self, stars: u32) {
        self.stars = stars;
    }

    pub fn add_stars(&mut self, amount: u32) {
        self.stars = self.stars.saturating_add(amount);
    }

    /// Deduct a cost, returns false (and empties the treasury) if it could not be covered
    pub fn spend(&mut self, cost: u32) -> bool {
        let covered = self.stars >= cost;
        self.stars = self.stars.saturating_sub(cost);
        covered
    }

    pub fn techs(&self) -> &AHashSet<Tech> {
        &self.techs
    }

    pub fn has_tech(&self, tech: Tech) -> bool {
        self.techs.contains(&tech)
    }

    pub fn unlock(&mut self, tech: Tech) {
        self.techs.insert(tech);
    }
}
