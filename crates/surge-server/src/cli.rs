//! CLI module for surge-server.
//!
//! Used either as the standalone `surge-server` binary or as the `server`
//! subcommand of the main surge-rules CLI.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use surge_config::{
    CliOverrides, LoggingConfig, apply_overrides, load_config, load_config_or_default,
    validate_config,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default config file, used only when present.
const DEFAULT_CONFIG_PATH: &str = "surge-rules.toml";

/// Server CLI arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "surge-server", version, about = "Surge rule-list server")]
pub struct ServerArgs {
    /// Config file path (toml/json/yaml). Defaults to ./surge-rules.toml if present.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: CliOverrides,
}

/// Run the server with the given arguments.
pub async fn run(args: ServerArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => load_config_or_default(DEFAULT_CONFIG_PATH, false)?,
    };
    apply_overrides(&mut config, &args.overrides);
    validate_config(&config)?;

    init_tracing(&config.logging);

    if let Some(listen) = &config.metrics.listen {
        match surge_metrics::init_prometheus(listen) {
            Ok(()) => info!("metrics server listening on {} (/metrics)", listen),
            Err(e) => warn!("failed to start metrics server: {}", e),
        }
    }

    info!(version = surge_core::VERSION, "starting surge-rules");
    crate::server::run(config).await?;
    Ok(())
}

/// Build the filter string from the base level and per-module overrides.
fn filter_directives(config: &LoggingConfig) -> String {
    let mut filter_str = config.level.as_deref().unwrap_or("info").to_string();
    for (module, level) in &config.filters {
        filter_str.push(',');
        filter_str.push_str(module);
        filter_str.push('=');
        filter_str.push_str(level);
    }
    filter_str
}

/// Initialize tracing subscriber with the given logging configuration.
///
/// Supports:
/// - `level`: Base log level (trace, debug, info, warn, error)
/// - `format`: Output format (json, pretty, compact). Default: pretty
/// - `output`: Output target (stdout, stderr). Default: stderr
/// - `filters`: Per-module log level overrides
fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_new(filter_directives(config)).unwrap_or_else(|_| EnvFilter::new("info"));

    let format = config.format.as_deref().unwrap_or("pretty");
    let output = config.output.as_deref().unwrap_or("stderr");

    match (format, output) {
        ("json", "stdout") => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(io::stdout))
                .init();
        }
        ("json", _) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(io::stderr))
                .init();
        }
        ("compact", "stdout") => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_writer(io::stdout))
                .init();
        }
        ("compact", _) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
        (_, "stdout") => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(io::stdout))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(io::stderr))
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_args_with_overrides() {
        let args = ServerArgs::try_parse_from([
            "surge-server",
            "--config",
            "custom.toml",
            "--listen",
            "127.0.0.1:9999",
            "--database-url",
            "sqlite::memory:",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
        assert_eq!(args.overrides.listen.as_deref(), Some("127.0.0.1:9999"));
        assert_eq!(args.overrides.database_url.as_deref(), Some("sqlite::memory:"));
    }

    #[test]
    fn filter_includes_module_overrides() {
        let mut config = LoggingConfig {
            level: Some("debug".into()),
            ..Default::default()
        };
        config.filters.insert("sqlx".into(), "warn".into());
        assert_eq!(filter_directives(&config), "debug,sqlx=warn");
        assert_eq!(filter_directives(&LoggingConfig::default()), "info");
    }
}
