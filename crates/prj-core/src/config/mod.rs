//! Configuration management with file persistence
//!
//! Holds the defaults applied when a record is first initialized. Loaded
//! from `config.toml` under the user config directory; `PRJ_CONFIG_DIR`
//! overrides the location.

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::record::{COLOUR_NONE, Status};

/// Placeholder description for records created without one
pub const DEFAULT_DESCRIPTION: &str = "My Exciting Project!";

/// prj configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub defaults: ProjectDefaults,
}

/// Field values used when a record is initialized without explicit changes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDefaults {
    pub status: Status,
    pub description: String,
    pub colour: String,
}

impl Default for ProjectDefaults {
    fn default() -> Self {
        Self {
            status: Status::Active,
            description: DEFAULT_DESCRIPTION.to_string(),
            colour: COLOUR_NONE.to_string(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var("PRJ_CONFIG_DIR") {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("prj")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, or use defaults if it doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            Ok(config)
        } else {
            // Return default config without creating file
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "defaults.status" => Ok(self.defaults.status.as_str().to_string()),
            "defaults.description" => Ok(self.defaults.description.clone()),
            "defaults.colour" => Ok(self.defaults.colour.clone()),
            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `prj config list` to see available keys.",
                key
            )),
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "defaults.status" => {
                let status = Status::parse(value)
                    .or_else(|| Status::from_code(value).ok())
                    .ok_or_else(|| {
                        anyhow!(
                            "Invalid status value: {}. Valid options: proposed, active, inactive, complete (or p, a, i, c)",
                            value
                        )
                    })?;
                self.defaults.status = status;
            }
            "defaults.description" => {
                self.defaults.description = value.to_string();
            }
            "defaults.colour" => {
                self.defaults.colour = value.to_string();
            }
            _ => {
                return Err(anyhow!(
                    "Unknown configuration key: {}. Use `prj config list` to see available keys.",
                    key
                ));
            }
        }
        Ok(())
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        let keys = vec!["defaults.status", "defaults.description", "defaults.colour"];

        keys.into_iter()
            .map(|key| {
                let value = self.get(key)?;
                Ok((key.to_string(), value))
            })
            .collect()
    }

    /// Reset configuration to defaults
    pub fn reset() -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove config file: {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_record_initializer() {
        let config = Config::default();
        assert_eq!(config.defaults.status, Status::Active);
        assert_eq!(config.defaults.description, DEFAULT_DESCRIPTION);
        assert_eq!(config.defaults.colour, COLOUR_NONE);
    }

    #[test]
    fn toml_round_trip() {
        let mut config = Config::default();
        config.defaults.status = Status::Proposed;
        config.defaults.colour = "red".to_string();

        let text = toml::to_string_pretty(&config).unwrap();
        let reloaded: Config = toml::from_str(&text).unwrap();
        assert_eq!(reloaded.defaults.status, Status::Proposed);
        assert_eq!(reloaded.defaults.description, DEFAULT_DESCRIPTION);
        assert_eq!(reloaded.defaults.colour, "red");
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let config: Config = toml::from_str("[defaults]\nstatus = \"inactive\"\n").unwrap();
        assert_eq!(config.defaults.status, Status::Inactive);
        assert_eq!(config.defaults.description, DEFAULT_DESCRIPTION);
        assert_eq!(config.defaults.colour, COLOUR_NONE);
    }

    #[test]
    fn get_and_set_by_key() {
        let mut config = Config::default();
        config.set("defaults.status", "c").unwrap();
        assert_eq!(config.get("defaults.status").unwrap(), "complete");

        config.set("defaults.status", "proposed").unwrap();
        assert_eq!(config.get("defaults.status").unwrap(), "proposed");

        config.set("defaults.description", "A new thing").unwrap();
        assert_eq!(config.get("defaults.description").unwrap(), "A new thing");
    }

    #[test]
    fn unknown_keys_and_bad_values_are_rejected() {
        let mut config = Config::default();
        assert!(config.get("defaults.owner").is_err());
        assert!(config.set("defaults.owner", "me").is_err());
        assert!(config.set("defaults.status", "finished").is_err());
    }

    #[test]
    fn list_covers_every_key() {
        let config = Config::default();
        let listed = config.list().unwrap();
        assert_eq!(listed.len(), 3);
        assert!(listed.iter().any(|(key, value)| key == "defaults.status" && value == "active"));
    }
}
