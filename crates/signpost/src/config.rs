// File: src/config.rs
// Purpose: Configuration parsing from signpost.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::host;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RoutingConfig {
    /// Base path for all routes (e.g., "/blog")
    #[serde(default)]
    pub base_path: Option<String>,

    /// Public site URL; its path becomes the base path when `base_path` is unset
    #[serde(default)]
    pub site_url: Option<String>,
}

// Default values
fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl RoutingConfig {
    /// Base path to route under: `base_path`, else inferred from `site_url`, else `/`
    pub fn resolve_base_path(&self) -> Result<String> {
        if let Some(base_path) = &self.base_path {
            return Ok(signpost_router::path::normalize_base_path(base_path).into_owned());
        }

        match &self.site_url {
            Some(site_url) => host::base_path_from_site_url(site_url),
            None => Ok("/".to_string()),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./signpost.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("signpost.toml")
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
