//! Configuration file handling.
//!
//! Reads from `~/.config/lal/lal.toml`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// LAL file used when `--file` is not given.
    #[serde(default = "default_file")]
    pub default_file: PathBuf,
    /// Whether `list` hides passwords.
    #[serde(default = "default_mask_passwords")]
    pub mask_passwords: bool,
    /// Maximum number of search results.
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

fn default_file() -> PathBuf {
    PathBuf::from("logins.lal")
}

fn default_mask_passwords() -> bool {
    true
}

fn default_search_limit() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_file: default_file(),
            mask_passwords: default_mask_passwords(),
            search_limit: default_search_limit(),
        }
    }
}

impl Config {
    /// Load configuration from the config file.
    ///
    /// If `custom_path` is provided, load from that path.
    /// Otherwise, load from the default XDG config location.
    /// Creates a default config file if it doesn't exist (only for default path).
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self> {
        match custom_path {
            Some(path) => Self::load_from(&path, false),
            None => Self::load_from(&Self::config_path()?, true),
        }
    }

    /// Load configuration from `path`.
    ///
    /// A missing file is an error unless `create_if_missing` is set, in which
    /// case a default config is written there and returned.
    fn load_from(path: &Path, create_if_missing: bool) -> Result<Self> {
        if !path.exists() {
            if !create_if_missing {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            let config = Config::default();
            config.save_to(path)?;
            tracing::info!("Created default config: {:?}", config);
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Get the path to the config file.
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("lal").join("lal.toml"))
    }
}
