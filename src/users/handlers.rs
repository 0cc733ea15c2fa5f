// HTTP handlers for user CRUD endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, error, info, warn};
use validator::Validate;

use crate::auth::{middleware::AuthenticatedUser, models::UserResponse, password::PasswordService};
use crate::users::{error::UserError, models::UpdateUserRequest};

/// Handler for GET /api/users
/// Lists all registered users (requires authentication)
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>),
        (status = 401, description = "Not authenticated", body = String, example = json!({"error": "Could not validate credentials"})),
        (status = 500, description = "Internal server error", body = String, example = json!({"error": "Internal server error"}))
    ),
    tag = "users"
)]
pub async fn list_users_handler(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<UserResponse>>, UserError> {
    debug!("Listing all users");

    let users = state.user_repo.list_users().await?;

    debug!("Retrieved {} users", users.len());
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Handler for GET /api/users/:id
/// Retrieves a specific user by ID (requires authentication)
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 401, description = "Not authenticated", body = String, example = json!({"error": "Could not validate credentials"})),
        (status = 404, description = "User not found", body = String, example = json!({"error": "User not found"}))
    ),
    tag = "users"
)]
pub async fn get_user_handler(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, UserError> {
    debug!("Fetching user with id: {}", id);

    let user = state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or(UserError::NotFound)?;

    Ok(Json(user.into()))
}

/// Handler for PUT /api/users/:id
/// Updates a user's information; users may only update their own profile
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Invalid input data", body = String, example = json!({"error": "Password must be at least 8 characters long"})),
        (status = 403, description = "Not the user's own profile", body = String, example = json!({"error": "You can only update your own profile"})),
        (status = 404, description = "User not found", body = String, example = json!({"error": "User not found"})),
        (status = 409, description = "Email or username already in use", body = String, example = json!({"error": "Email already in use"}))
    ),
    tag = "users"
)]
pub async fn update_user_handler(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, UserError> {
    debug!("Updating user with id: {}", id);

    request
        .validate()
        .map_err(|e| UserError::ValidationError(e.to_string()))?;

    if state.user_repo.find_by_id(id).await?.is_none() {
        return Err(UserError::NotFound);
    }

    if user.user_id != id {
        warn!(
            "User {} attempted to update profile of user {}",
            user.user_id, id
        );
        return Err(UserError::Forbidden(
            "You can only update your own profile".to_string(),
        ));
    }

    // Re-hash off the async scheduler when a new password is supplied
    let password_hash = match request.password {
        Some(password) => Some(
            tokio::task::spawn_blocking(move || PasswordService::hash_password(&password))
                .await
                .map_err(|e| {
                    error!("Hashing task failed: {}", e);
                    UserError::Internal("password hashing failed".to_string())
                })??,
        ),
        None => None,
    };

    let updated = state
        .user_repo
        .update_user(
            id,
            request.username.as_deref(),
            request.email.as_deref(),
            password_hash.as_deref(),
        )
        .await?
        .ok_or(UserError::NotFound)?;

    info!("Successfully updated user with id: {}", id);
    Ok(Json(updated.into()))
}

/// Handler for DELETE /api/users/:id
/// Deletes a user; users may only delete their own profile
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 403, description = "Not the user's own profile", body = String, example = json!({"error": "You can only delete your own profile"})),
        (status = 404, description = "User not found", body = String, example = json!({"error": "User not found"}))
    ),
    tag = "users"
)]
pub async fn delete_user_handler(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, UserError> {
    debug!("Deleting user with id: {}", id);

    if state.user_repo.find_by_id(id).await?.is_none() {
        return Err(UserError::NotFound);
    }

    if user.user_id != id {
        warn!(
            "User {} attempted to delete profile of user {}",
            user.user_id, id
        );
        return Err(UserError::Forbidden(
            "You can only delete your own profile".to_string(),
        ));
    }

    if !state.user_repo.delete_user(id).await? {
        return Err(UserError::NotFound);
    }

    info!("Successfully deleted user with id: {}", id);
    Ok(StatusCode::NO_CONTENT)
}
