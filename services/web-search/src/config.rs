//! Configuration loading for web-search
//!
//! Configuration is loaded from:
//! 1. Environment variables KEY and CX
//! 2. Environment variable WEB_SEARCH_CONFIG_PATH
//! 3. ~/.web-search/config.toml
//! 4. Default values

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Google Custom Search API key
pub const ENV_API_KEY: &str = "KEY";

/// Google Custom Search engine id
pub const ENV_SEARCH_ENGINE_ID: &str = "CX";

/// Overrides the config file location
pub const ENV_CONFIG_PATH: &str = "WEB_SEARCH_CONFIG_PATH";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Google Custom Search credentials
    #[serde(default)]
    pub google: GoogleConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

/// Google Custom Search configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// API key
    #[serde(default)]
    pub key: String,
    /// Custom search engine id (`cx`)
    #[serde(default)]
    pub engine_id: String,
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl GoogleConfig {
    /// Both credentials are present
    pub fn is_complete(&self) -> bool {
        !self.key.is_empty() && !self.engine_id.is_empty()
    }
}

impl Config {
    /// Load configuration from file or use defaults, then apply env overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_path() {
            Some(path) => Self::load_from(&path)?,
            None => {
                tracing::info!("No config path specified, using defaults");
                Self::default()
            }
        };

        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration from `path`, or defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config in {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Override credentials from the environment (highest priority)
    ///
    /// `lookup` is `std::env::var` in production; tests pass a map.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY) {
            self.google.key = key;
        }
        if let Some(engine_id) = lookup(ENV_SEARCH_ENGINE_ID) {
            self.google.engine_id = engine_id;
        }
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        // 1. Check environment variable
        if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
            return Some(PathBuf::from(path));
        }

        // 2. Check ~/.web-search/config.toml
        if let Ok(home) = std::env::var("HOME") {
            let path = PathBuf::from(home).join(".web-search").join("config.toml");
            return Some(path);
        }

        None
    }
}
