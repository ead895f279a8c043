//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("authorization header required")]
    MissingAuthorization,

    #[error("invalid authorization header format")]
    InvalidAuthorizationFormat,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("token has been revoked")]
    RevokedToken,

    #[error("user not found")]
    UserNotFound,

    /// The external auth service could not be reached or answered garbage.
    #[error("authentication service unavailable")]
    ServiceUnavailable,

    #[error("auth configuration error: {0}")]
    Configuration(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AuthError::MissingAuthorization => (
                StatusCode::UNAUTHORIZED,
                "MISSING_AUTHORIZATION",
                "Authorization header required".to_string(),
            ),
            AuthError::InvalidAuthorizationFormat => (
                StatusCode::UNAUTHORIZED,
                "INVALID_AUTHORIZATION",
                "Invalid authorization header format".to_string(),
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid or expired token".to_string(),
            ),
            AuthError::RevokedToken => (
                StatusCode::UNAUTHORIZED,
                "REVOKED_TOKEN",
                "Token has been revoked".to_string(),
            ),
            AuthError::UserNotFound => (
                StatusCode::UNAUTHORIZED,
                "USER_NOT_FOUND",
                "User not found".to_string(),
            ),
            AuthError::ServiceUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AUTH_SERVICE_UNAVAILABLE",
                "Authentication service unavailable".to_string(),
            ),
            AuthError::Configuration(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "AUTH_CONFIGURATION", msg)
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
