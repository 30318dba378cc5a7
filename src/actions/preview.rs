//! Read-only action previews for presentation layers

use serde::Serialize;

use crate::actions::action::Action;
use crate::actions::catalog::ActionCategory;
use crate::core::config::RulesConfig;
use crate::core::error::Result;
use crate::core::types::PlayerId;
use crate::world::World;

/// What a player would see for one candidate action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionPreview {
    pub label: String,
    /// Grouping for menus: harvest, construction, terraform or demolition
    pub category: ActionCategory,
    pub cost: u32,
    pub visible: bool,
    pub performable: bool,
    /// Why the action is hidden or cannot be performed
    pub reason: Option<String>,
    /// Planned consequences, cascade entries included
    pub consequences: Vec<String>,
}

impl ActionPreview {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Action {
    /// Describe this action for `player` without touching the world
    pub fn preview(&self, world: &World, config: &RulesConfig, player: PlayerId) -> Result<ActionPreview> {
        let legality = self.check(world, config, player);
        let consequences = if legality.is_visible() {
            self.consequences(world, config, player)?
                .iter()
                .map(|c| c.to_string())
                .collect()
        } else {
            Vec::new()
        };

        Ok(ActionPreview {
            label: self.describe(world),
            category: self.kind().category(),
            cost: self.cost(config),
            visible: legality.is_visible(),
            performable: legality.is_performable(),
            reason: legality.reason(),
            consequences,
        })
    }
}
