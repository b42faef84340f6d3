//! Route handlers.
//!
//! Each handler reads its parameters from the query string, talks to the
//! rule store, and answers text, HTML or JSON. Failures are [`ApiError`]s.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query, State};
use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use surge_core::DEFAULT_RULE_TYPE;
use surge_metrics::{record_rule_type_deleted, record_rules_ingested};
use surge_store::ingest;
use tracing::info;

use crate::error::ApiError;
use crate::pages;
use crate::sanitize::encode_component;
use crate::state::AppState;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Query parameters shared by all routes.
///
/// A key given more than once keeps its first value; unknown keys are
/// ignored.
#[derive(Debug, Default)]
pub(crate) struct RuleQuery {
    /// Rule type being viewed, fetched or deleted.
    rule: Option<String>,
    /// Newline-delimited rules to insert.
    rules: Option<String>,
    /// Rule type to insert into (falls back to `rule`), `ruleType` on the wire.
    rule_type: Option<String>,
}

impl RuleQuery {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut q = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "rule" => &mut q.rule,
                "rules" => &mut q.rules,
                "ruleType" => &mut q.rule_type,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        q
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RuleQuery {
    type Rejection = QueryRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state).await?;
        Ok(Self::from_pairs(pairs))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl RuleQuery {
    /// `rule`, or the default rule type when absent or empty.
    fn rule(&self) -> &str {
        non_empty(self.rule.as_deref()).unwrap_or(DEFAULT_RULE_TYPE)
    }

    /// `ruleType`, else `rule`, else the default rule type.
    fn insert_rule_type(&self) -> &str {
        non_empty(self.rule_type.as_deref()).unwrap_or_else(|| self.rule())
    }
}

fn text(body: impl Into<String>) -> Response {
    ([(header::CONTENT_TYPE, TEXT_PLAIN)], body.into()).into_response()
}

/// GET / - landing page, or redirect to the default rule type.
pub(crate) async fn home(q: RuleQuery) -> Response {
    if q.rule.is_some() {
        return Html(pages::home(q.rule())).into_response();
    }
    let location = format!("/?rule={}", encode_component(DEFAULT_RULE_TYPE));
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// GET /rule - newline-terminated rule lines of one type.
pub(crate) async fn get_rules(
    State(state): State<AppState>,
    q: RuleQuery,
) -> Result<Response, ApiError> {
    let rule = q.rule();
    let lines = state
        .store
        .list_rules(rule)
        .await
        .map_err(ApiError::storage("error querying rules"))?;

    if lines.is_empty() {
        return Err(ApiError::NotFound(format!(
            "no rules found for rule type \"{rule}\""
        )));
    }

    let mut body = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in &lines {
        body.push_str(line);
        body.push('\n');
    }
    Ok(text(body))
}

/// GET /insert - ingest `rules` under `ruleType`.
pub(crate) async fn insert(
    State(state): State<AppState>,
    q: RuleQuery,
) -> Result<Response, ApiError> {
    let Some(rules) = non_empty(q.rules.as_deref()) else {
        return Err(ApiError::Validation("rules must not be empty".into()));
    };
    let rule_type = q.insert_rule_type();

    let report = ingest(state.store.as_ref(), rule_type, rules)
        .await
        .map_err(ApiError::storage("error inserting rules"))?;

    record_rules_ingested(report.inserted(), report.ignored());
    info!(
        rule_type,
        processed = report.len(),
        inserted = report.inserted(),
        ignored = report.ignored(),
        "rules inserted"
    );
    Ok(text(report.receipt()))
}

/// GET /get-rule-types - JSON array of rule types.
pub(crate) async fn get_rule_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    let types = state
        .store
        .list_rule_types()
        .await
        .map_err(ApiError::storage("error fetching rule types"))?;
    Ok(Json(types))
}

/// GET /rule-list - HTML index of rule types.
pub(crate) async fn rule_list(State(state): State<AppState>) -> Result<Response, ApiError> {
    let types = state
        .store
        .list_rule_types()
        .await
        .map_err(ApiError::storage("error fetching rule list"))?;

    if types.is_empty() {
        return Err(ApiError::NotFound("no rule types found".into()));
    }
    Ok(Html(pages::rule_list(&types)).into_response())
}

/// GET /delete-rule - delete every rule of one type.
pub(crate) async fn delete_rule(
    State(state): State<AppState>,
    q: RuleQuery,
) -> Result<Response, ApiError> {
    let Some(rule) = non_empty(q.rule.as_deref()) else {
        return Err(ApiError::Validation(
            "no rule type specified for deletion".into(),
        ));
    };

    let outcome = state
        .store
        .delete_rule_type(rule)
        .await
        .map_err(ApiError::storage("error deleting rule type"))?;

    record_rule_type_deleted();
    info!(rule_type = rule, deleted = outcome.deleted, "rule type deleted");
    Ok(text(format!(
        "rule type \"{rule}\" and all of its rules deleted ({} removed)",
        outcome.deleted
    )))
}

/// GET /health
pub(crate) async fn health() -> Response {
    text("ok")
}

/// Known route, wrong method.
pub(crate) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Unknown route.
pub(crate) async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".into())
}
