//! Default configuration values.
//!
//! Centralized default constants for use across all crates.

// ============================================================================
// Rule Defaults
// ============================================================================

/// Rule type used whenever a request leaves it unspecified or empty.
pub const DEFAULT_RULE_TYPE: &str = "direct";
/// Prefix given to rule lines that carry no `TYPE,` part.
pub const DEFAULT_RULE_PREFIX: &str = "DOMAIN,";

// ============================================================================
// Server Defaults
// ============================================================================

/// Default HTTP listen address.
pub const DEFAULT_LISTEN: &str = "0.0.0.0:8787";
/// Default graceful shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Database Defaults
// ============================================================================

/// Default database URL (SQLite file, created on first use).
pub const DEFAULT_DATABASE_URL: &str = "sqlite:rules.db?mode=rwc";
/// Default maximum pool connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
/// Default minimum pool connections.
pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;
/// Default pool acquire timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
/// Create the rules table on startup.
pub const DEFAULT_INIT_SCHEMA: bool = true;
/// Run each insert batch inside one transaction.
pub const DEFAULT_ATOMIC_BATCHES: bool = false;
