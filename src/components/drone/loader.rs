use bevy::prelude::*;
use std::path::Path;
use thiserror::Error;

use crate::components::drone::config::DroneConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid drone configuration: {0}")]
    ValidationError(String),
}

impl DroneConfig {
    /// Loads and validates a drone configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&contents)?;
        info!("Loaded drone config '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: DroneConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let config: DroneConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration as YAML.
    pub fn save_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_file_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let mut config = DroneConfig::default();
        config.name = "round_trip".to_string();
        config.max_thrust = 1500.0;

        let temp_file = NamedTempFile::new()?;
        config.save_yaml(temp_file.path())?;
        let loaded = DroneConfig::from_yaml_file(temp_file.path())?;

        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_missing_stall_ratio_uses_default() {
        let mut value = serde_json::to_value(DroneConfig::default()).unwrap();
        value
            .as_object_mut()
            .unwrap()
            .remove("stall_lift_ratio");

        let config = DroneConfig::from_json_str(&value.to_string()).unwrap();
        assert_eq!(config.stall_lift_ratio, crate::utils::STALL_LIFT_RATIO);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = DroneConfig::default();
        config.tail_mass = -5.0;
        let yaml = serde_yaml::to_string(&config).unwrap();

        let result = DroneConfig::from_yaml_str(&yaml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = DroneConfig::from_yaml_file("/nonexistent/drone.yaml");
        assert!(matches!(result, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_malformed_yaml() {
        let result = DroneConfig::from_yaml_str("gravity: [not, a, number");
        assert!(matches!(result, Err(ConfigError::YamlError(_))));
    }
}
