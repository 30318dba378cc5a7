//! Rules configuration with documented constants
//!
//! Every tunable number in the rule matrix lives here. The defaults
//! reproduce the standard ruleset; a TOML file may override any subset
//! of fields, the rest falling back to their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::actions::catalog::ActionKind;
use crate::core::error::{Result, RulesError};
use crate::world::improvement::ImprovementType;

/// Largest accepted population per level of an improvement
pub const MAX_BASE_VALUE: u32 = 1_000;

/// Largest accepted offset of the city level-up threshold
pub const MAX_THRESHOLD_OFFSET: u32 = 1_000;

/// Configuration for the action/consequence engine
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Population contributed per level of each improvement type
    pub improvements: ImprovementValues,
    /// Star cost paid by the acting player, per action kind
    pub costs: ActionCosts,
    /// Fixed yields of actions that are not improvement-driven
    pub yields: ActionYields,
    /// City growth policy consumed by population consequences
    pub city: CityGrowth,
}

/// Base value (population per level) for each improvement type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImprovementValues {
    pub farm: u32,
    pub mine: u32,
    pub lumber_hut: u32,
    pub port: u32,
    pub sawmill: u32,
    pub forge: u32,
    pub windmill: u32,
}

impl Default for ImprovementValues {
    fn default() -> Self {
        Self {
            farm: 2,
            mine: 2,
            lumber_hut: 1,
            port: 1,
            sawmill: 1,
            forge: 2,
            windmill: 1,
        }
    }
}

impl ImprovementValues {
    pub fn base_value(&self, kind: ImprovementType) -> u32 {
        match kind {
            ImprovementType::Farm => self.farm,
            ImprovementType::Mine => self.mine,
            ImprovementType::LumberHut => self.lumber_hut,
            ImprovementType::Port => self.port,
            ImprovementType::Sawmill => self.sawmill,
            ImprovementType::Forge => self.forge,
            ImprovementType::Windmill => self.windmill,
        }
    }
}

/// Star cost for each action kind
///
/// Destruction, forest clearing and whaling are free by default; their
/// affordability clause is then trivially satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionCosts {
    pub harvest_fruit: u32,
    pub fishing: u32,
    pub hunting: u32,
    pub farming: u32,
    pub mining: u32,
    pub whaling: u32,
    pub build_lumber_hut: u32,
    pub build_port: u32,
    pub clear_forest: u32,
    pub build_sawmill: u32,
    pub build_forge: u32,
    pub build_windmill: u32,
    pub destroy_improvement: u32,
}

impl Default for ActionCosts {
    fn default() -> Self {
        Self {
            harvest_fruit: 2,
            fishing: 2,
            hunting: 2,
            farming: 5,
            mining: 5,
            whaling: 0,
            build_lumber_hut: 2,
            build_port: 10,
            clear_forest: 0,
            build_sawmill: 5,
            build_forge: 5,
            build_windmill: 5,
            destroy_improvement: 0,
        }
    }
}

impl ActionCosts {
    pub fn cost(&self, kind: ActionKind) -> u32 {
        match kind {
            ActionKind::HarvestFruit => self.harvest_fruit,
            ActionKind::Fishing => self.fishing,
            ActionKind::Hunting => self.hunting,
            ActionKind::Farming => self.farming,
            ActionKind::Mining => self.mining,
            ActionKind::Whaling => self.whaling,
            ActionKind::BuildLumberHut => self.build_lumber_hut,
            ActionKind::BuildPort => self.build_port,
            ActionKind::ClearForest => self.clear_forest,
            ActionKind::BuildSawmill => self.build_sawmill,
            ActionKind::BuildForge => self.build_forge,
            ActionKind::BuildWindmill => self.build_windmill,
            ActionKind::DestroyImprovement => self.destroy_improvement,
        }
    }
}

/// Fixed rewards of harvesting-style actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionYields {
    /// Population gained by harvesting fruit, fishing or hunting
    pub harvest_population: u32,
    /// Stars credited by whaling
    pub whaling_stars: u32,
    /// Stars credited by clearing a forest
    pub clear_forest_stars: u32,
}

impl Default for ActionYields {
    fn default() -> Self {
        Self {
            harvest_population: 1,
            whaling_stars: 10,
            clear_forest_stars: 2,
        }
    }
}

/// City growth policy
///
/// A city at level `L` upgrades once its population reaches
/// `L + threshold_offset`. Surplus population carries over into the new
/// level. Cities never grow past `max_level`; population keeps
/// accumulating there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityGrowth {
    pub threshold_offset: u32,
    pub max_level: u32,
}

impl Default for CityGrowth {
    fn default() -> Self {
        Self {
            threshold_offset: 1,
            max_level: 8,
        }
    }
}

impl CityGrowth {
    /// Population needed for a city at `level` to reach the next level
    pub fn level_up_threshold(&self, level: u32) -> u32 {
        level.saturating_add(self.threshold_offset)
    }
}

impl RulesConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RulesConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded rules config from {}", path.display());
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        for kind in ImprovementType::ALL {
            let value = self.improvements.base_value(kind);
            if value == 0 || value > MAX_BASE_VALUE {
                return Err(RulesError::InvalidConfig(format!(
                    "base value of {} must be between 1 and {}, got {}",
                    kind, MAX_BASE_VALUE, value
                )));
            }
        }

        if self.city.max_level == 0 {
            return Err(RulesError::InvalidConfig("max_level must be at least 1".into()));
        }
        if self.city.threshold_offset > MAX_THRESHOLD_OFFSET {
            return Err(RulesError::InvalidConfig(format!(
                "threshold_offset must be at most {}, got {}",
                MAX_THRESHOLD_OFFSET, self.city.threshold_offset
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_costs_match_rule_table() {
        let costs = ActionCosts::default();
        assert_eq!(costs.cost(ActionKind::HarvestFruit), 2);
        assert_eq!(costs.cost(ActionKind::Farming), 5);
        assert_eq!(costs.cost(ActionKind::BuildPort), 10);
        assert_eq!(costs.cost(ActionKind::Whaling), 0);
        assert_eq!(costs.cost(ActionKind::ClearForest), 0);
        assert_eq!(costs.cost(ActionKind::DestroyImprovement), 0);
    }

    #[test]
    fn test_level_up_threshold() {
        let growth = CityGrowth::default();
        assert_eq!(growth.level_up_threshold(1), 2);
        assert_eq!(growth.level_up_threshold(4), 5);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = RulesConfig::from_toml_str(
            r#"
            [improvements]
            sawmill = 3

            [costs]
            build_port = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.improvements.sawmill, 3);
        assert_eq!(config.improvements.farm, 2);
        assert_eq!(config.costs.build_port, 7);
        assert_eq!(config.costs.farming, 5);
        assert_eq!(config.yields, ActionYields::default());
        assert_eq!(config.city, CityGrowth::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = RulesConfig::from_toml_str("").unwrap();
        assert_eq!(config, RulesConfig::default());
    }

    #[test]
    fn test_zero_base_value_rejected() {
        let result = RulesConfig::from_toml_str("[improvements]\nfarm = 0\n");
        assert!(matches!(result, Err(RulesError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_max_level_rejected() {
        let result = RulesConfig::from_toml_str("[city]\nmax_level = 0\n");
        assert!(matches!(result, Err(RulesError::InvalidConfig(_))));
    }

    #[test]
    fn test_extreme_threshold_offset_rejected() {
        let result = RulesConfig::from_toml_str("[city]\nthreshold_offset = 4294967295\n");
        assert!(matches!(result, Err(RulesError::InvalidConfig(_))));

        let growth = CityGrowth {
            threshold_offset: u32::MAX,
            max_level: 8,
        };
        assert_eq!(growth.level_up_threshold(3), u32::MAX);
    }

    #[test]
    fn test_extreme_base_value_rejected() {
        let result = RulesConfig::from_toml_str("[improvements]\nforge = 4294967295\n");
        assert!(matches!(result, Err(RulesError::InvalidConfig(_))));
        assert!(RulesConfig::from_toml_str("[improvements]\nforge = 1000\n").is_ok());
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let result = RulesConfig::from_toml_str("[costs\nfarming = 5");
        assert!(matches!(result, Err(RulesError::TomlError(_))));
    }
}
