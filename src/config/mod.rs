use crate::search::service::{DEFAULT_NAV_RADIUS, DEFAULT_PAGE_SIZE};
use anyhow::{bail, Context};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "~/.config/nesql/server.yaml";
const DEFAULT_DATABASE_PATH: &str = "~/.local/share/nesql/nesql.db";

/// Overrides the default configuration file location
pub const CONFIG_PATH_ENV: &str = "NESQL_CONFIG_PATH";

/// Search configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Results per page, must be positive
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Pages shown on each side of the current page in navigation
    #[serde(default = "default_nav_radius")]
    pub nav_radius: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            nav_radius: DEFAULT_NAV_RADIUS,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Exported dataset
    #[serde(default = "default_database_path")]
    pub database: PathBuf,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_nav_radius() -> u32 {
    DEFAULT_NAV_RADIUS
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_database_path() -> PathBuf {
    expand_path(DEFAULT_DATABASE_PATH)
}

impl Config {
    /// Load configuration from `$NESQL_CONFIG_PATH` or the default path,
    /// falling back to defaults when the file does not exist
    pub fn load() -> Result<Self, anyhow::Error> {
        let config_path = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => expand_path(&path),
            _ => expand_path(DEFAULT_CONFIG_PATH),
        };

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("Configuration not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path; the file must exist
    pub fn load_from(path: &Path) -> Result<Self, anyhow::Error> {
        info!("Loading configuration from: {:?}", path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse, expand tilde paths and validate
    pub fn from_yaml(content: &str) -> Result<Self, anyhow::Error> {
        // serde's #[serde(default)] handles all defaults during deserialization
        let mut config: Config = serde_yaml::from_str(content).context("Invalid configuration")?;

        config.database = expand_path(&config.database.to_string_lossy());
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.search.page_size == 0 {
            bail!("search.page_size must be greater than 0");
        }
        if self.server.host.trim().is_empty() {
            bail!("server.host must not be empty");
        }
        Ok(())
    }

    /// `host:port` for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            search: SearchConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}
