use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{logging::LoggingConfig, phone::PhoneLinkConfig};
use crate::components::ConfigError;
use crate::utils::{DEFAULT_TIMESTEP, MAX_TIMESTEP, MIN_TIMESTEP};

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fixed tick length [s].
    pub time_step: f64,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub phone: PhoneLinkConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIMESTEP,
            logging: LoggingConfig::default(),
            phone: PhoneLinkConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TIMESTEP..=MAX_TIMESTEP).contains(&self.time_step) {
            return Err(ConfigError::ValidationError(format!(
                "time_step must lie in [{MIN_TIMESTEP}, {MAX_TIMESTEP}], got {}",
                self.time_step
            )));
        }
        Ok(())
    }
}
