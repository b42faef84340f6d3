//! Metrics collection and Prometheus exporter for surge-rules.
//!
//! Recording functions are cheap no-ops until an exporter is installed, so
//! handlers call them unconditionally.

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Initialize Prometheus metrics exporter.
///
/// Starts an HTTP listener on the given address serving `/metrics`.
/// Must be called from within a Tokio runtime.
pub fn init_prometheus(listen: &str) -> Result<(), String> {
    let addr: SocketAddr = listen
        .parse()
        .map_err(|e| format!("invalid metrics listen address: {}", e))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("failed to install prometheus exporter: {}", e))?;

    Ok(())
}

// ============================================================================
// Metric Names
// ============================================================================

/// HTTP requests by route and status code.
pub const REQUESTS_TOTAL: &str = "surge_requests_total";
/// Rule lines that produced a new row.
pub const RULES_INSERTED_TOTAL: &str = "surge_rules_inserted_total";
/// Rule lines ignored as duplicates.
pub const RULES_IGNORED_TOTAL: &str = "surge_rules_ignored_total";
/// Rule types deleted.
pub const RULE_TYPES_DELETED_TOTAL: &str = "surge_rule_types_deleted_total";
/// Errors by type.
pub const ERRORS_TOTAL: &str = "surge_errors_total";

// ============================================================================
// Metric Recording Functions
// ============================================================================

/// Record a finished HTTP request.
#[inline]
pub fn record_request(route: &'static str, status: u16) {
    counter!(REQUESTS_TOTAL, "route" => route, "status" => status.to_string()).increment(1);
}

/// Record the outcome of one ingestion batch.
#[inline]
pub fn record_rules_ingested(inserted: usize, ignored: usize) {
    counter!(RULES_INSERTED_TOTAL).increment(inserted as u64);
    counter!(RULES_IGNORED_TOTAL).increment(ignored as u64);
}

/// Record a rule type deletion.
#[inline]
pub fn record_rule_type_deleted() {
    counter!(RULE_TYPES_DELETED_TOTAL).increment(1);
}

/// Record an error by type.
#[inline]
pub fn record_error(error_type: &'static str) {
    counter!(ERRORS_TOTAL, "type" => error_type).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_exporter_is_noop() {
        record_request("/rule", 200);
        record_rules_ingested(2, 1);
        record_rule_type_deleted();
        record_error("storage");
    }

    #[test]
    fn invalid_listen_address() {
        assert!(init_prometheus("not an address").is_err());
    }
}
