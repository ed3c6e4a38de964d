//! Simulation configuration, loadable from JSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use armada_core::constants::{
    FREE_SEARCH_RADIUS, MAX_FREE_SEARCH_RADIUS, PRODUCTION_COOLDOWN_SECS, SHIP_DEFAULT_SPEED,
};
use armada_core::faction::{default_roster, Faction, FactionId};
use armada_core::SimError;
use armada_faction_ai::AiProfile;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("invalid faction roster: {0}")]
    Roster(#[from] SimError),
}

/// Configuration for starting a new simulation.
///
/// Every field has a default, so a JSON file only needs the overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Speed given to newly created ships (world units per second).
    pub ship_speed: f64,
    /// Minimum time between two ships from the same station.
    pub production_cooldown_secs: f64,
    /// Ring limit for the free-position search used by move orders.
    pub free_search_radius: u32,
    pub factions: Vec<Faction>,
    pub player_faction: FactionId,
    /// Place the demo fleet when the simulation starts.
    pub populate_initial_units: bool,
    pub ai: AiProfile,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ship_speed: SHIP_DEFAULT_SPEED,
            production_cooldown_secs: PRODUCTION_COOLDOWN_SECS,
            free_search_radius: FREE_SEARCH_RADIUS,
            factions: default_roster(),
            player_faction: FactionId::from("player"),
            populate_initial_units: true,
            ai: AiProfile::default(),
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.ship_speed > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "ship_speed must be positive, got {}",
                self.ship_speed
            )));
        }
        if !(self.production_cooldown_secs >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "production_cooldown_secs must not be negative, got {}",
                self.production_cooldown_secs
            )));
        }
        if self.free_search_radius > MAX_FREE_SEARCH_RADIUS {
            return Err(ConfigError::Invalid(format!(
                "free_search_radius must be at most {MAX_FREE_SEARCH_RADIUS}, got {}",
                self.free_search_radius
            )));
        }
        self.ai.validate().map_err(ConfigError::Invalid)
    }
}
