//! Storage error types.

/// Storage error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database driver or query failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Backend error not coming from the driver.
    #[error("backend error: {0}")]
    Backend(String),

    /// Unsupported database URL scheme.
    #[error("unsupported database URL: {0}")]
    UnsupportedUrl(String),
}

impl StoreError {
    /// Create a backend error from any error type.
    #[inline]
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }
}
