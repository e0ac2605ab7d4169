//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::validation::FieldViolation;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Resource Errors**: referenced customer or credit does not exist
/// - **Integrity Errors**: ids that exist but do not form one aggregate
/// - **Validation Errors**: request fields breaking a constraint
/// - **Uniqueness Errors**: duplicate CPF or email
/// - **Request Errors**: body, path or query string that cannot be parsed
/// - **Database Errors**: any sqlx::Error from store operations
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A referenced customer or credit does not exist.
    ///
    /// The message names the missing key, e.g. `Id 2 not found`.
    /// Returns HTTP 400 Bad Request.
    #[error("{0}")]
    NotFound(String),

    /// Customer id and credit code are both valid but belong to different aggregates.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("{0}")]
    InvalidArgument(String),

    /// One or more request fields failed validation.
    ///
    /// Returns HTTP 400 Bad Request with one detail entry per field.
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    /// The request could not be decoded: malformed JSON, wrong field types,
    /// a non-numeric id or a missing query parameter.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("{0}")]
    InvalidRequest(String),

    /// A unique column (CPF, email) already holds this value.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("{0}")]
    Conflict(String),

    /// Database operation failed (e.g., connection error, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Unexpected state, such as an unknown status value read back from storage.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable code placed in the `exception` field of the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::InvalidArgument(_) => "invalid_argument",
            AppError::Validation(_) => "validation",
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::Conflict(_) => "conflict",
            AppError::Database(_) | AppError::Internal(_) => "internal_error",
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("password hashing failed: {err}"))
    }
}

/// Body returned for every error response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub title: String,
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub exception: String,
    pub details: BTreeMap<String, String>,
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "title": "Bad Request! Consult the documentation",
///   "timestamp": "2025-12-20T10:00:00Z",
///   "status": 400,
///   "exception": "not_found",
///   "details": { "message": "Id 2 not found" }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `NotFound`, `InvalidArgument`, `Validation`, `InvalidRequest` → 400 Bad Request
/// - `Conflict` → 409 Conflict
/// - `Database`, `Internal` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, title, details) = match self {
            AppError::NotFound(msg)
            | AppError::InvalidArgument(msg)
            | AppError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "Bad Request! Consult the documentation",
                message_details(msg),
            ),
            AppError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                "Bad Request! Consult the documentation",
                violations
                    .into_iter()
                    .map(|v| (v.field.to_string(), v.message))
                    .collect(),
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                "Conflict! Consult the documentation",
                message_details(msg),
            ),
            AppError::Database(ref e) => {
                tracing::error!(error = ?e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    message_details("An internal error occurred".to_string()),
                )
            }
            AppError::Internal(ref msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    message_details("An internal error occurred".to_string()),
                )
            }
        };

        let body = ErrorResponse {
            title: title.to_string(),
            timestamp: Utc::now(),
            status: status.as_u16(),
            exception: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

fn message_details(message: String) -> BTreeMap<String, String> {
    BTreeMap::from([("message".to_string(), message)])
}
