//! Configuration management for the application.
//!
//! Loads, validates, and saves application configuration in TOML format
//! with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::APP_NAME;
use crate::print::PrintConfig;

/// Data storage locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DataConfig {
    /// Directory holding the store's JSON documents. Defaults to
    /// `<config dir>/data` when unset.
    pub dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Storage locations
    pub data: DataConfig,
    /// Default print settings used when the CLI is not given overrides
    pub print: PrintConfig,
}

impl Config {
    /// Gets the platform-specific configuration directory.
    ///
    /// - Linux: `~/.config/Cardcraft/`
    /// - macOS: `~/Library/Application Support/Cardcraft/`
    /// - Windows: `%APPDATA%\Cardcraft\`
    pub fn config_dir() -> Result<PathBuf> {
        let base = dirs::config_dir().context("Could not determine config directory")?;
        Ok(base.join(APP_NAME))
    }

    /// Path to the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads the configuration, falling back to defaults when the file does
    /// not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Saves the configuration, creating the config directory if needed.
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Resolves the data directory, applying the default when unset.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::config_dir()?.join("data")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::print::PaperSize;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&toml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("[data]\ndir = \"/tmp/cards\"\n").unwrap();
        assert_eq!(config.data.dir.as_deref(), Some(std::path::Path::new("/tmp/cards")));
        assert_eq!(config.print.paper_size, PaperSize::A4);
        assert_eq!(config.print.cards_per_page, 4);
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = Config {
            data: DataConfig {
                dir: Some(PathBuf::from("/somewhere/else")),
            },
            ..Config::default()
        };
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/somewhere/else"));
    }
}
