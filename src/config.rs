//! Configuration loading for openverse-mcp
//!
//! Configuration is loaded from:
//! 1. Environment variable OPENVERSE_API_URL (base URL override)
//! 2. Environment variable OPENVERSE_MCP_CONFIG_PATH
//! 3. ~/.config/openverse-mcp.toml
//! 4. Default values (the public api.openverse.org endpoint)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Upstream API configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Search behavior configuration
    #[serde(default)]
    pub search: SearchConfig,
}

/// Upstream Openverse API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Openverse API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Search behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Page size used when the caller does not supply one
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Hard cap on page size sent upstream (Openverse rejects more)
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
    /// Default page size for related-image lookups
    #[serde(default = "default_related_page_size")]
    pub related_page_size: u32,
}

// Default value functions
fn default_base_url() -> String {
    "https://api.openverse.org/v1".to_string()
}

fn default_user_agent() -> String {
    "MCP-Openverse/1.0".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_page_size() -> u32 {
    20
}

fn default_max_page_size() -> u32 {
    500
}

fn default_related_page_size() -> u32 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            related_page_size: default_related_page_size(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_path();

        let mut config = if let Some(path) = config_path {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                let content = std::fs::read_to_string(&path)?;
                toml::from_str(&content)?
            } else {
                tracing::info!("Config file not found, using defaults");
                Self::default()
            }
        } else {
            tracing::info!("No config path specified, using defaults");
            Self::default()
        };

        // API base URL from environment (highest priority)
        if let Ok(url) = std::env::var("OPENVERSE_API_URL") {
            config.api.base_url = url;
        }

        Ok(config)
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        // 1. Check environment variable
        if let Ok(path) = std::env::var("OPENVERSE_MCP_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        // 2. Check ~/.config/openverse-mcp.toml
        if let Ok(home) = std::env::var("HOME") {
            let path = PathBuf::from(home).join(".config").join("openverse-mcp.toml");
            return Some(path);
        }

        None
    }
}
