// Authentication error types

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::auth::token::TokenType;

/// Authentication error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid password: {0}")]
    InvalidPasswordFormat(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Missing authentication token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Invalid token type: expected '{expected}', got '{actual}'")]
    TokenTypeMismatch {
        expected: TokenType,
        actual: TokenType,
    },

    #[error("Token is missing a subject claim")]
    MissingSubject,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Username already exists")]
    UsernameAlreadyExists,

    #[error("Password hashing error")]
    PasswordHashError,

    #[error("Token creation error: {0}")]
    TokenCreationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidPasswordFormat(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::ExpiredToken
            | AuthError::TokenTypeMismatch { .. }
            | AuthError::MissingSubject => StatusCode::UNAUTHORIZED,
            AuthError::EmailAlreadyExists => StatusCode::CONFLICT,
            AuthError::UsernameAlreadyExists => StatusCode::CONFLICT,
            AuthError::PasswordHashError
            | AuthError::TokenCreationError(_)
            | AuthError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for every token-verification failure kind
    ///
    /// These all collapse into one uniform 401 response so a caller cannot
    /// tell an expired token from a malformed or wrong-type one; the
    /// specific kind is only preserved in the logs.
    fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken
                | AuthError::InvalidToken
                | AuthError::ExpiredToken
                | AuthError::TokenTypeMismatch { .. }
                | AuthError::MissingSubject
        )
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if self.is_token_rejection() {
            warn!("Token rejected: {}", self);
            let body = Json(json!({
                "error": "Could not validate credentials",
            }));
            return (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                body,
            )
                .into_response();
        }

        let (status, message) = match &self {
            AuthError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AuthError::InvalidPasswordFormat(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AuthError::InvalidCredentials => {
                warn!("Failed login attempt");
                (
                    StatusCode::UNAUTHORIZED,
                    "Incorrect email or password".to_string(),
                )
            }
            AuthError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Email already registered".to_string())
            }
            AuthError::UsernameAlreadyExists => {
                (StatusCode::CONFLICT, "Username already taken".to_string())
            }
            AuthError::PasswordHashError => {
                error!("Password hashing error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AuthError::TokenCreationError(msg) => {
                error!("Token creation error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AuthError::DatabaseError(msg) => {
                error!("Database error in auth: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            // Token rejections are handled above
            _ => (
                StatusCode::UNAUTHORIZED,
                "Could not validate credentials".to_string(),
            ),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
