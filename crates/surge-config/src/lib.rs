//! Configuration loading and CLI definitions.

mod defaults;
mod loader;
mod validate;

use std::collections::BTreeMap;

use clap::Parser;
use serde::{Deserialize, Serialize};

use defaults::*;
pub use loader::{ConfigError, load_config, load_config_or_default};
pub use validate::validate_config;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen address, e.g. 0.0.0.0:8787
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Seconds to wait for in-flight requests on shutdown.
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL (sqlite:, postgres://, mysql://).
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Create the rules table on startup if missing.
    #[serde(default = "default_init_schema")]
    pub init_schema: bool,
    /// Wrap each /insert batch in one transaction.
    #[serde(default = "default_atomic_batches")]
    pub atomic_batches: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
            init_schema: default_init_schema(),
            atomic_batches: default_atomic_batches(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MetricsConfig {
    /// Prometheus exporter listen address (disabled when unset).
    pub listen: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Base level (trace, debug, info, warn, error).
    pub level: Option<String>,
    /// pretty | compact | json
    pub format: Option<String>,
    /// stdout | stderr
    pub output: Option<String>,
    /// Per-module level overrides, e.g. `sqlx = "warn"`.
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Parser, Default)]
pub struct CliOverrides {
    /// Override HTTP listen address, e.g. 0.0.0.0:8787
    #[arg(long)]
    pub listen: Option<String>,
    /// Override database URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
    /// Override maximum pool connections
    #[arg(long)]
    pub max_connections: Option<u32>,
    /// Wrap insert batches in a transaction
    #[arg(long)]
    pub atomic_batches: Option<bool>,
    /// Override metrics listen address
    #[arg(long)]
    pub metrics_listen: Option<String>,
    /// Override log level (trace/debug/info/warn/error)
    #[arg(long)]
    pub log_level: Option<String>,
    /// Override log format (pretty/compact/json)
    #[arg(long)]
    pub log_format: Option<String>,
}

pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) {
    if let Some(v) = &overrides.listen {
        config.server.listen = v.clone();
    }
    if let Some(v) = &overrides.database_url {
        config.database.url = v.clone();
    }
    if let Some(v) = overrides.max_connections {
        config.database.max_connections = v;
        config.database.min_connections = config.database.min_connections.min(v);
    }
    if let Some(v) = overrides.atomic_batches {
        config.database.atomic_batches = v;
    }
    if let Some(v) = &overrides.metrics_listen {
        config.metrics.listen = Some(v.clone());
    }
    if let Some(v) = &overrides.log_level {
        config.logging.level = Some(v.clone());
    }
    if let Some(v) = &overrides.log_format {
        config.logging.format = Some(v.clone());
    }
}
