//! API error type and HTTP mapping
//!
//! Every failure that can cross the route boundary is one of these
//! variants; raw database or hashing errors never reach the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

pub type ApiResult<T> = Result<T, ApiError>;

/// A single failed field check from request body validation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed registration/update input. 422 with field-level messages.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Bad login. Deliberately generic: the client must not be able to
    /// tell an unknown username from a wrong password.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Missing, malformed, or expired bearer token.
    #[error("authentication required")]
    Unauthenticated,

    #[error("{0} not found")]
    NotFound(&'static str),

    /// Duplicate username on registration.
    #[error("{0}")]
    Conflict(String),

    /// Client error outside the other buckets (e.g. deleting an unknown
    /// user, which has historically answered 400 rather than 404).
    #[error("{0}")]
    BadRequest(String),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = err {
            if db.is_unique_violation() && db.constraint() == Some("users_username_key") {
                return ApiError::Conflict("username already exists".to_string());
            }
        }
        tracing::error!(error = ?err, "Database query failed");
        ApiError::Internal(err.into())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidCredentials | ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let ApiError::Internal(ref err) = self {
            tracing::error!(error = ?err, "Request failed with internal error");
        }

        let body = match self {
            ApiError::Validation(errors) => Json(json!({
                "errors": errors,
                "code": status.as_u16(),
            })),
            other => Json(json!({
                "error": other.to_string(),
                "code": status.as_u16(),
            })),
        };

        (status, body).into_response()
    }
}
