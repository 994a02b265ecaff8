//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use axum::http::StatusCode;
use thiserror::Error;

/// linkwatch error type
#[derive(Debug, Error)]
pub enum LwError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Timeout error
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LwError {
    /// Returns a safe error message for external clients.
    ///
    /// This method returns a generic error message that does not expose
    /// internal implementation details such as file paths or SQL text.
    /// Full error details are available via the `Display` implementation
    /// and belong in server logs only.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration error",
            Self::Database(_) => "Database error",
            Self::Http(_) => "Upstream request failed",
            Self::Timeout(_) => "Request timeout",
            Self::NotFound(_) => "Not found",
            Self::Internal(_) => "Internal server error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Http(_) => StatusCode::BAD_GATEWAY,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for LwError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Result type alias
pub type LwResult<T> = Result<T, LwError>;
