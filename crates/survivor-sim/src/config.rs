//! Simulation configuration.
//!
//! `SimConfig` can be built in code (usually `..Default::default()`) or
//! loaded from JSON, in which case every field is optional and validated.

use serde::{Deserialize, Serialize};

use survivor_core::constants::{MAX_HOSTILES, OBSTACLE_COUNT, WAVE_INTERVAL_MS, WAVE_SIZE};
use survivor_core::enums::HeroKind;

/// Upper bound on generated obstacles.
const MAX_OBSTACLES: usize = 200;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Hero preselected for the first encounter.
    pub hero: HeroKind,
    /// Obstacles generated per arena.
    pub obstacle_count: usize,
    /// Total hostiles the spawn director may create.
    pub max_hostiles: u32,
    /// Hostiles composed per wave.
    pub wave_size: u32,
    /// Time between waves (ms).
    pub wave_interval_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            hero: HeroKind::default(),
            obstacle_count: OBSTACLE_COUNT,
            max_hostiles: MAX_HOSTILES,
            wave_size: WAVE_SIZE,
            wave_interval_ms: WAVE_INTERVAL_MS,
        }
    }
}

/// Errors raised while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl SimConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wave_size == 0 {
            return Err(ConfigError::Invalid {
                field: "wave_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_hostiles == 0 {
            return Err(ConfigError::Invalid {
                field: "max_hostiles",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.wave_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "wave_interval_ms",
                reason: "must be positive".to_string(),
            });
        }
        if self.obstacle_count > MAX_OBSTACLES {
            return Err(ConfigError::Invalid {
                field: "obstacle_count",
                reason: format!("{} exceeds the limit of {MAX_OBSTACLES}", self.obstacle_count),
            });
        }
        Ok(())
    }
}
