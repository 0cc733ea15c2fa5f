// HTTP handlers for authentication endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::auth::{
    error::AuthError,
    middleware::AuthenticatedUser,
    models::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest, UserResponse},
};

/// Register a new user
/// POST /api/auth/register
pub async fn register_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthError> {
    let response = state.auth_service.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login a user
/// POST /api/auth/login
pub async fn login_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let response = state.auth_service.login(request).await?;
    Ok(Json(response))
}

/// Exchange a refresh token for a new token pair
/// POST /api/auth/refresh
pub async fn refresh_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let response = state.auth_service.refresh(&request.refresh_token).await?;
    Ok(Json(response))
}

/// Get the current user's profile (protected endpoint)
/// GET /api/auth/me
pub async fn me_handler(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UserResponse>, AuthError> {
    let response = state.auth_service.current_user(user.user_id).await?;
    Ok(Json(response))
}
