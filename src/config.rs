//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application
//! configuration in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    CONFIG_DIR_NAME, DEFAULT_ASSET_ROOT, DEFAULT_AUDIO_EXT, DEFAULT_HIGHLIGHT_MS, DEFAULT_LANG,
};

/// Audio asset location configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Directory the per-language sound directories live under.
    pub root: PathBuf,
    /// Audio file extension (without the dot).
    pub extension: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ASSET_ROOT),
            extension: DEFAULT_AUDIO_EXT.to_string(),
        }
    }
}

/// Keyboard session behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Language selected when a session starts.
    pub default_lang: String,
    /// How long a pressed key stays highlighted, in milliseconds.
    pub highlight_ms: u64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            default_lang: DEFAULT_LANG.to_string(),
            highlight_ms: DEFAULT_HIGHLIGHT_MS,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Audio asset locations.
    #[serde(default)]
    pub assets: AssetConfig,
    /// Session behavior.
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

impl Config {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlight duration as a [`Duration`].
    pub fn highlight_duration(&self) -> Duration {
        Duration::from_millis(self.behavior.highlight_ms)
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.assets.extension.is_empty() {
            anyhow::bail!("audio extension cannot be empty");
        }
        if self.assets.extension.starts_with('.') {
            anyhow::bail!("audio extension must not include the leading dot");
        }
        if self.behavior.default_lang.is_empty() {
            anyhow::bail!("default language cannot be empty");
        }
        if self.behavior.highlight_ms == 0 {
            anyhow::bail!("highlight duration must be at least 1 ms");
        }
        Ok(())
    }

    /// Gets the platform-specific configuration directory.
    ///
    /// - Linux: `~/.config/Keyvox/`
    /// - macOS: `~/Library/Application Support/Keyvox/`
    /// - Windows: `%APPDATA%\Keyvox\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration, creating the config directory if needed.
    ///
    /// Writes to a temp file first and renames it into place so the config
    /// file is never left half-written.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to move config into place: {}",
            config_path.display()
        ))?;

        Ok(())
    }
}
