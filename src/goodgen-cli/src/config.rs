//! Configuration management for the goodgen CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default upstream data mirror
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/Sycamore0/GenshinData/main";

/// Default texture CDN
pub const DEFAULT_TEXTURES_URL: &str = "https://enka.network/ui";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    pub data_url: Option<String>,
    pub textures_url: Option<String>,
    pub frontend_dir: Option<PathBuf>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("goodgen");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Upstream data mirror base URL
    pub fn data_url(&self) -> &str {
        self.data_url.as_deref().unwrap_or(DEFAULT_DATA_URL)
    }

    /// Texture CDN base URL
    pub fn textures_url(&self) -> &str {
        self.textures_url.as_deref().unwrap_or(DEFAULT_TEXTURES_URL)
    }

    /// Front-end checkout directory, if configured
    pub fn frontend_dir(&self) -> Option<&Path> {
        self.frontend_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_exists() {
        let result = Config::config_path();
        assert!(result.is_ok());
    }

    #[test]
    fn test_defaults_without_config() {
        let config = Config::default();
        assert_eq!(config.data_url(), DEFAULT_DATA_URL);
        assert_eq!(config.textures_url(), DEFAULT_TEXTURES_URL);
        assert!(config.frontend_dir().is_none());
    }

    #[test]
    fn test_roundtrip_toml() {
        let config = Config {
            data_url: Some("https://example.com/data".to_string()),
            textures_url: None,
            frontend_dir: Some(PathBuf::from("/tmp/frontend")),
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.data_url(), "https://example.com/data");
        assert_eq!(parsed.textures_url(), DEFAULT_TEXTURES_URL);
    }
}
