//! Custom error types for the authentication service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Custom error type for authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// No user matched the supplied username and password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Registration collided with an existing username or email
    #[error("Username or email already exists")]
    DuplicateUser,

    /// Request input failed validation
    #[error("{0}")]
    Validation(String),

    /// No valid session accompanies the request
    #[error("Not authenticated")]
    Unauthenticated,

    /// A stored password hash could not be parsed
    #[error("Stored password hash is corrupt: {0}")]
    DataIntegrity(String),

    /// Hashing a new password failed
    #[error("Failed to hash password: {0}")]
    Hashing(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::InvalidCredentials | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::DuplicateUser => StatusCode::CONFLICT,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::DataIntegrity(_)
            | AuthError::Hashing(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let error_message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for authentication results
pub type AuthResult<T> = Result<T, AuthError>;
