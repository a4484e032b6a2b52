//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_DIR_ENV, CONFIG_DIR_NAME};
use crate::keymap::{UnmappedKeyPolicy, DEFAULT_HEADER_LINES};

/// Keymap merge settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Output file used when none is given on the command line
    #[serde(default = "default_keymap_output")]
    pub default_output: PathBuf,
    /// Handling of vendor keys with no baseline counterpart
    #[serde(default)]
    pub unmapped_keys: UnmappedKeyPolicy,
    /// Leading lines of a PCOMM export to skip
    #[serde(default = "default_header_lines")]
    pub header_lines: usize,
}

fn default_keymap_output() -> PathBuf {
    PathBuf::from("zie_keymap.kmp")
}

fn default_header_lines() -> usize {
    DEFAULT_HEADER_LINES
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            default_output: default_keymap_output(),
            unmapped_keys: UnmappedKeyPolicy::default(),
            header_lines: default_header_lines(),
        }
    }
}

/// SRL conversion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrlConfig {
    /// Output file used when none is given on the command line
    #[serde(default = "default_sftl_output")]
    pub default_output: PathBuf,
}

fn default_sftl_output() -> PathBuf {
    PathBuf::from("output.sftl")
}

impl Default for SrlConfig {
    fn default() -> Self {
        Self {
            default_output: default_sftl_output(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/MigEmulator/config.toml`
/// - macOS: `~/Library/Application Support/MigEmulator/config.toml`
/// - Windows: `%APPDATA%\MigEmulator\config.toml`
///
/// `MIGEMULATOR_CONFIG_DIR` overrides the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Keymap merge settings
    #[serde(default)]
    pub keymap: KeymapConfig,
    /// SRL conversion settings
    #[serde(default)]
    pub srl: SrlConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the configuration directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

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
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
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

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - default output names are not empty
    pub fn validate(&self) -> Result<()> {
        if self.keymap.default_output.as_os_str().is_empty() {
            anyhow::bail!("keymap.default_output must not be empty");
        }
        if self.srl.default_output.as_os_str().is_empty() {
            anyhow::bail!("srl.default_output must not be empty");
        }

        Ok(())
    }
}
