//! Configuration module for Corkboard.

use serde::Deserialize;
use std::path::Path;

use crate::{CorkboardError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Timezone for displaying dates (e.g., "Europe/Berlin", "UTC").
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Whether to serve files under `/static`.
    #[serde(default = "default_serve_static")]
    pub serve_static: bool,
    /// Path to the static files directory.
    #[serde(default = "default_static_path")]
    pub static_path: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_serve_static() -> bool {
    true
}

fn default_static_path() -> String {
    "static".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timezone: default_timezone(),
            serve_static: default_serve_static(),
            static_path: default_static_path(),
        }
    }
}

/// Key-value store backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// SQLite file through sqlx.
    Sqlite,
    /// In-process map; data is lost on restart.
    Memory,
    /// Redis server.
    Redis,
}

impl StoreBackend {
    /// Get the backend name as used in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Sqlite => "sqlite",
            StoreBackend::Memory => "memory",
            StoreBackend::Redis => "redis",
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = CorkboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            other => Err(CorkboardError::Config(format!(
                "unknown store backend: {other}"
            ))),
        }
    }
}

/// Key-value store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Which backend to use.
    #[serde(default = "default_backend")]
    pub backend: StoreBackend,
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
}

fn default_backend() -> StoreBackend {
    StoreBackend::Sqlite
}

fn default_db_path() -> String {
    "data/corkboard.db".to_string()
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379/".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_db_path(),
            redis_url: default_redis_url(),
        }
    }
}

/// Templates configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesConfig {
    /// Directory searched for page templates overriding the built-in ones.
    #[serde(default = "default_templates_path")]
    pub path: String,
}

fn default_templates_path() -> String {
    "templates".to_string()
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            path: default_templates_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/corkboard.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Templates configuration.
    #[serde(default)]
    pub templates: TemplatesConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(CorkboardError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| CorkboardError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CORKBOARD_STORE_BACKEND`: `sqlite`, `memory` or `redis`
    /// - `CORKBOARD_DB_PATH`: SQLite database file
    /// - `CORKBOARD_REDIS_URL`: Redis connection URL
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(backend) = non_empty_env("CORKBOARD_STORE_BACKEND") {
            self.store.backend = backend.parse()?;
        }
        if let Some(path) = non_empty_env("CORKBOARD_DB_PATH") {
            self.store.path = path;
        }
        if let Some(url) = non_empty_env("CORKBOARD_REDIS_URL") {
            self.store.redis_url = url;
        }
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The redis backend is selected without a URL, or the binary was
    ///   built without the `redis` feature
    /// - The sqlite backend is selected without a database path
    pub fn validate(&self) -> Result<()> {
        match self.store.backend {
            StoreBackend::Redis => {
                if !cfg!(feature = "redis") {
                    return Err(CorkboardError::Config(
                        "redis backend selected but corkboard was built without the `redis` feature"
                            .to_string(),
                    ));
                }
                if self.store.redis_url.trim().is_empty() {
                    return Err(CorkboardError::Config(
                        "redis backend selected but redis_url is not set".to_string(),
                    ));
                }
            }
            StoreBackend::Sqlite => {
                if self.store.path.trim().is_empty() {
                    return Err(CorkboardError::Config(
                        "sqlite backend selected but store path is not set".to_string(),
                    ));
                }
            }
            StoreBackend::Memory => {}
        }
        Ok(())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
