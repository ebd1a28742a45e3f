use crate::errors::NavResult;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub mod range_types;

use range_types::*;

/// All navigation tunables, persisted as TOML in the platform config directory
#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default)]
pub struct NavConfig {
    pub graph: GraphSettings,
    pub cache: CacheSettings,
    pub steering: SteeringSettings,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct GraphSettings {
    /// Spacing the external grid builder used between node samples
    pub grid_frequency: GridFrequency,
    /// Multiplier on the `frequency * sqrt(2)` connection threshold
    pub connection_slack: ConnectionSlack,
    /// Overlap radius for per-node obstruction probes
    pub node_probe_radius: ProbeRadius,
    /// Seconds between periodic obstruction refreshes
    pub refresh_interval: RefreshInterval,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct CacheSettings {
    pub capacity: CacheCapacity,
    /// Radius of the local candidate scan performed on a cache miss
    pub local_search_radius: LocalSearchRadius,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SteeringSettings {
    pub detection_range: DetectionRange,
    pub danger_range: DangerRange,
    pub agent_radius: AgentRadius,
    /// Amount subtracted from the interest strength per blocked move
    pub strength_correction: StrengthCorrection,
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|mut path| {
            path.push("waygrid");
            fs::create_dir_all(&path).ok()?;
            path.push("config.toml");
            Some(path)
        })
        .flatten()
}

pub fn load_config() -> NavConfig {
    if let Some(config_path) = get_config_path() {
        if let Ok(contents) = fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<NavConfig>(&contents) {
                return config;
            }
        }
    }
    NavConfig::default()
}

pub fn save_config(config: &NavConfig) -> NavResult<()> {
    if let Some(config_path) = get_config_path() {
        let contents = toml::to_string_pretty(config)?;
        fs::write(config_path, contents)?;
    }
    Ok(())
}
