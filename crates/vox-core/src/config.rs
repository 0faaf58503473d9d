//! Configuration management for Vox.
//!
//! Loads configuration from ${VOX_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for Vox configuration and data directories.
    //!
    //! VOX_HOME resolution order:
    //! 1. VOX_HOME environment variable (if set)
    //! 2. ~/.config/vox (default)

    use std::path::PathBuf;

    /// Returns the Vox home directory.
    ///
    /// Checks VOX_HOME env var first, falls back to ~/.config/vox
    pub fn vox_home() -> PathBuf {
        if let Ok(home) = std::env::var("VOX_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("vox"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        vox_home().join("config.toml")
    }

    /// Returns the directory for TUI log files.
    pub fn logs_dir() -> PathBuf {
        vox_home().join("logs")
    }
}

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the backend REST API.
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    const DEFAULT_API_URL: &str = "http://localhost:5000/api";

    /// Loads configuration from the default config path.
    ///
    /// The VOX_API_URL environment variable, when set, overrides the
    /// configured base URL.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        } else {
            Config::default()
        };

        if let Ok(url) = std::env::var("VOX_API_URL")
            && !url.trim().is_empty()
        {
            config.api_url = url;
        }

        // Trailing slashes would double up when joined with request paths.
        while config.api_url.ends_with('/') {
            config.api_url.pop();
        }

        Ok(config)
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}
