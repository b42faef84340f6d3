//! Server error types.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use surge_config::ConfigError;
use surge_core::{ERROR_CONFIG, ERROR_METHOD, ERROR_NOT_FOUND, ERROR_STORAGE, ERROR_VALIDATION};
use surge_metrics::record_error;
use surge_store::StoreError;
use tracing::error;

/// Server startup/runtime error.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("store: {0}")]
    Store(#[from] StoreError),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
}

impl ServerError {
    /// Get the error type string for metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Io(_) => "io",
            ServerError::Store(_) => ERROR_STORAGE,
            ServerError::Config(_) => ERROR_CONFIG,
        }
    }
}

/// Error answered to an HTTP client as a plain-text response.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or empty required parameter (400).
    #[error("{0}")]
    Validation(String),

    /// Method not accepted on this route (405).
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// Unknown route or empty result where absence matters (404).
    #[error("{0}")]
    NotFound(String),

    /// Persistence failure (500), prefixed with what was being done.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Adapter for `map_err` that attaches a context to a store error.
    pub fn storage(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Storage { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string for metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => ERROR_VALIDATION,
            ApiError::MethodNotAllowed => ERROR_METHOD,
            ApiError::NotFound(_) => ERROR_NOT_FOUND,
            ApiError::Storage { .. } => ERROR_STORAGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage { context, source } = &self {
            error!(error = %source, "{}", context);
        }
        record_error(self.error_type());

        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_message_has_context() {
        let err = ApiError::storage("error querying rules")(StoreError::backend("disk gone"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "error querying rules: backend error: disk gone");
    }
}
