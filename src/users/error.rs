// Error types for user CRUD operations

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::auth::error::AuthError;

/// Error types for user operations
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for UserError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailAlreadyExists => {
                UserError::Conflict("Email already in use".to_string())
            }
            AuthError::UsernameAlreadyExists => {
                UserError::Conflict("Username already taken".to_string())
            }
            AuthError::ValidationError(msg) | AuthError::InvalidPasswordFormat(msg) => {
                UserError::ValidationError(msg)
            }
            other => UserError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            UserError::NotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            UserError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            UserError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            UserError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            UserError::Internal(msg) => {
                error!("Internal error in users: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_mapping_from_auth() {
        let err = UserError::from(AuthError::EmailAlreadyExists);
        assert!(matches!(err, UserError::Conflict(_)));

        let err = UserError::from(AuthError::InvalidPasswordFormat("too short".to_string()));
        assert!(matches!(err, UserError::ValidationError(_)));

        let err = UserError::from(AuthError::DatabaseError("boom".to_string()));
        assert!(matches!(err, UserError::Internal(_)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            UserError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            UserError::Forbidden("no".to_string()).into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            UserError::Conflict("dup".to_string()).into_response().status(),
            StatusCode::CONFLICT
        );
    }
}
