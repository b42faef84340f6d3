//! Error type labels for metrics and logging.
//!
//! These constants keep error classification consistent across crates.

/// Missing or malformed request parameter.
pub const ERROR_VALIDATION: &str = "validation";
/// Request method not accepted by the route.
pub const ERROR_METHOD: &str = "method";
/// Route unmatched or query returned nothing.
pub const ERROR_NOT_FOUND: &str = "not_found";
/// Persistence layer failure.
pub const ERROR_STORAGE: &str = "storage";
/// Configuration error.
pub const ERROR_CONFIG: &str = "config";
