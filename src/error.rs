//! Errors surfaced by the auth workflow and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::users::StoreError;

/// Shared by every credential failure so responses never reveal whether an
/// email is registered.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("Email already registered")]
    Conflict,

    #[error("{}", INVALID_CREDENTIALS)]
    Unauthorized,

    /// Bearer token missing, malformed or expired.
    #[error("{0}")]
    InvalidToken(&'static str),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type AuthResult<T> = Result<T, AuthError>;

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => AuthError::Conflict,
            other => AuthError::Internal(other.into()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
            AuthError::Conflict => (StatusCode::CONFLICT, "email_taken"),
            AuthError::Unauthorized | AuthError::InvalidToken(_) => {
                (StatusCode::UNAUTHORIZED, "unauthorized")
            }
            AuthError::Internal(e) => {
                error!(error = %e, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let body = match self {
            AuthError::Validation(fields) => json!({
                "error": {
                    "code": code,
                    "message": "Invalid request",
                    "fields": fields,
                }
            }),
            AuthError::Internal(_) => json!({
                "error": { "code": code, "message": "Internal server error" }
            }),
            other => json!({
                "error": { "code": code, "message": other.to_string() }
            }),
        };

        (status, Json(body)).into_response()
    }
}
