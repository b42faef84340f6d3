//! Configuration validation logic.

use std::net::SocketAddr;

use crate::Config;
use crate::loader::ConfigError;

const LOG_FORMATS: [&str; 3] = ["pretty", "compact", "json"];
const LOG_OUTPUTS: [&str; 2] = ["stdout", "stderr"];

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.listen.parse::<SocketAddr>().is_err() {
        return Err(ConfigError::Validation(format!(
            "server.listen is not a socket address: {:?}",
            config.server.listen
        )));
    }
    if config.database.url.trim().is_empty() {
        return Err(ConfigError::Validation("database.url is empty".into()));
    }
    if config.database.max_connections == 0 {
        return Err(ConfigError::Validation(
            "database.max_connections must be > 0".into(),
        ));
    }
    if config.database.min_connections > config.database.max_connections {
        return Err(ConfigError::Validation(
            "database.min_connections must be <= max_connections".into(),
        ));
    }
    if config.database.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "database.connect_timeout_secs must be > 0".into(),
        ));
    }
    if let Some(listen) = &config.metrics.listen {
        if listen.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "metrics.listen is not a socket address: {listen:?}"
            )));
        }
    }
    if let Some(format) = &config.logging.format {
        if !LOG_FORMATS.contains(&format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.format must be one of: {LOG_FORMATS:?}"
            )));
        }
    }
    if let Some(output) = &config.logging.output {
        if !LOG_OUTPUTS.contains(&output.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.output must be one of: {LOG_OUTPUTS:?}"
            )));
        }
    }
    Ok(())
}
