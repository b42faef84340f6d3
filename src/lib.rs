//! # surge-rules
//!
//! Stores Surge/Clash style rule lines grouped by rule type and serves them
//! back as plain-text lists, with a small web UI for editing.
//!
//! ## Crates
//!
//! - [`surge_core`] - Default values and shared constants
//! - [`surge_store`] - Rule storage backends and ingestion
//! - [`surge_config`] - Configuration loading and validation
//! - [`surge_metrics`] - Prometheus-compatible metrics
//! - [`surge_server`] - HTTP server and pages

pub use surge_config as config;
pub use surge_core as core;
pub use surge_metrics as metrics;
pub use surge_server as server;
pub use surge_store as store;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use surge_config::{Config, load_config, validate_config};
    pub use surge_server::{CancellationToken, ServerError, routes, run, run_with_shutdown};
    pub use surge_store::{MemoryStore, RuleStore, StoreError, ingest};
}
