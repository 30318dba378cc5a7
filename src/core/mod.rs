pub mod config;
pub mod error;
pub mod types;

pub use config::RulesConfig;
pub use error::{Result, RulesError};
pub use types::{CityId, ImprovementId, PlayerId, ResourceId, TileId};
