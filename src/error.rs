//! Application error type and its HTTP mapping.
//!
//! Every failure surfaced by the service flows through [`AppError`]. Client
//! faults carry their own message; internal failures are logged and replaced
//! by a generic message so no database details leak to callers.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Generic message returned for any unclassified server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed client input (400).
    #[error("{0}")]
    Validation(String),

    /// No matching record, or a reserved path (404).
    #[error("{0}")]
    NotFound(String),

    /// Short code already taken (409).
    #[error("{0}")]
    Conflict(String),

    /// Every generated code collided with an existing one (500).
    #[error("Failed to generate unique code after {attempts} attempts")]
    CodeGenerationExhausted { attempts: usize },

    /// Request ran past the configured time limit (503).
    #[error("Request timed out")]
    Timeout,

    /// Database unreachable or query failure (500).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            AppError::CodeGenerationExhausted { .. } | AppError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to the client.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message) => message.clone(),
            AppError::CodeGenerationExhausted { .. } => "Failed to generate unique code".to_string(),
            AppError::Timeout => "Request timed out".to_string(),
            AppError::Database(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => error!(error = %e, "Database failure while handling request"),
            AppError::CodeGenerationExhausted { attempts } => {
                error!(attempts, "Short code generation exhausted")
            }
            _ => {}
        }

        let body = ErrorBody {
            error: self.public_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

/// Returns true when `e` is a unique violation on the `links.code` constraint.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some("links_code_key"))
}
