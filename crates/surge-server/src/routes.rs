//! Static routing table.

use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{Router, routing::get};
use surge_metrics::record_request;
use surge_store::RuleStore;
use tracing::debug;

use crate::handler;
use crate::state::AppState;

/// Build the application router over `store`.
///
/// Read-only routes answer GET and HEAD. `/insert` and `/delete-rule` write,
/// so they answer GET only. Other methods get 405, unknown paths get 404.
pub fn routes(store: Arc<dyn RuleStore>) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/", get(handler::home).fallback(handler::method_not_allowed))
        .route(
            "/rule",
            get(handler::get_rules).fallback(handler::method_not_allowed),
        )
        .route(
            "/insert",
            get(handler::insert)
                .head(handler::method_not_allowed)
                .fallback(handler::method_not_allowed),
        )
        .route(
            "/get-rule-types",
            get(handler::get_rule_types).fallback(handler::method_not_allowed),
        )
        .route(
            "/rule-list",
            get(handler::rule_list).fallback(handler::method_not_allowed),
        )
        .route(
            "/delete-rule",
            get(handler::delete_rule)
                .head(handler::method_not_allowed)
                .fallback(handler::method_not_allowed),
        )
        .route(
            "/health",
            get(handler::health).fallback(handler::method_not_allowed),
        )
        .fallback(handler::not_found)
        .layer(middleware::from_fn(track_requests))
        .with_state(state)
}

/// Metrics label for a request path.
fn route_label(path: &str) -> &'static str {
    match path {
        "/" => "/",
        "/rule" => "/rule",
        "/insert" => "/insert",
        "/get-rule-types" => "/get-rule-types",
        "/rule-list" => "/rule-list",
        "/delete-rule" => "/delete-rule",
        "/health" => "/health",
        _ => "other",
    }
}

async fn track_requests(req: Request, next: Next) -> Response {
    let route = route_label(req.uri().path());
    let method = req.method().clone();
    let response = next.run(req).await;
    let status = response.status().as_u16();

    record_request(route, status);
    debug!(%method, route, status, "request handled");
    response
}
