use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// How many users one load call asks the user service for.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Base URLs of the two upstream services.
///
/// Both are keyless public APIs; the URLs are configurable so tests and
/// self-hosted mirrors can redirect the clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    pub users: String,
    pub weather: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            users: "https://randomuser.me/api/".to_string(),
            weather: "https://api.open-meteo.com/v1/forecast".to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Example TOML:
    /// batch_size = 10
    /// [endpoints]
    /// users = "https://randomuser.me/api/"
    pub batch_size: usize,
    pub endpoints: Endpoints,
}

impl Default for Config {
    fn default() -> Self {
        Self { batch_size: DEFAULT_BATCH_SIZE, endpoints: Endpoints::default() }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, use the public endpoints.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "peoplecast", "peoplecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
