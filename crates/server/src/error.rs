//! Unified error handling for the customer registry.
//!
//! Provides a unified `AppError` type covering the three failure categories
//! the service exposes: field validation failures, missing records, and
//! storage failures. All route handlers return `Result<T, AppError>`; the
//! `IntoResponse` impl renders every failure as a field-addressable
//! `{"errors": {...}}` JSON payload.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;

/// Field-keyed validation error messages.
///
/// An empty map never leaves the validator; a non-empty map means the
/// submitted record was rejected before reaching storage.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Application-level error type for the customer registry.
#[derive(Debug, Error)]
pub enum AppError {
    /// A submitted record failed field validation (or email uniqueness).
    #[error("validation failed")]
    Validation(FieldErrors),

    /// A referenced record does not exist.
    #[error("not found: {message}")]
    NotFound {
        /// Key under which the message is reported (e.g. `customer`, `export`).
        scope: &'static str,
        /// Human-readable reason.
        message: String,
    },

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// A validation error for a single field.
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::from([(field, message.into())]))
    }

    /// A not-found error reported under the given key.
    #[must_use]
    pub fn not_found(scope: &'static str, message: impl Into<String>) -> Self {
        Self::NotFound {
            scope,
            message: message.into(),
        }
    }
}

/// JSON body for every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    errors: FieldErrors,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors; validation and not-found are client-correctable
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "request error");
        }

        let (status, errors) = match self {
            Self::Validation(errors) => (StatusCode::BAD_REQUEST, errors),
            Self::NotFound { scope, message } => {
                (StatusCode::NOT_FOUND, FieldErrors::from([(scope, message)]))
            }
            // Don't expose internal error details to clients
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                FieldErrors::from([("database", "database operation failed".to_owned())]),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                FieldErrors::from([("internal", "internal server error".to_owned())]),
            ),
        };

        (status, Json(ErrorBody { errors })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
