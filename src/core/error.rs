use thiserror::Error;

use crate::core::types::{CityId, ImprovementId, PlayerId, ResourceId, TileId};

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("Player not found: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Tile not found: {0}")]
    UnknownTile(TileId),

    #[error("City not found: {0}")]
    UnknownCity(CityId),

    #[error("Resource not found: {0}")]
    UnknownResource(ResourceId),

    #[error("Improvement not found: {0}")]
    UnknownImprovement(ImprovementId),

    #[error("Coordinates out of bounds: ({0}, {1})")]
    OutOfBounds(u32, u32),

    #[error("{action} cannot target {subject}")]
    SubjectMismatch { action: String, subject: String },

    #[error("Consequence no longer applies: {0}")]
    StaleConsequence(String),

    #[error("{action} is not performable: {reason}")]
    NotPerformable { action: String, reason: String },

    #[error("Invalid rules config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RulesError>;
