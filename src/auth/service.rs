// Authentication service - business logic layer

use std::sync::Arc;

use tracing::{error, info};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    models::{AuthResponse, LoginRequest, RegisterRequest, User, UserResponse},
    password::PasswordService,
    repository::UserRepository,
    token::{TokenService, TokenType},
};

/// Authentication service coordinating registration, login, and refresh
pub struct AuthService {
    user_repo: UserRepository,
    token_service: Arc<TokenService>,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(user_repo: UserRepository, token_service: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            token_service,
        }
    }

    /// Register a new user and issue a token pair
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AuthError> {
        request
            .validate()
            .map_err(|e| AuthError::ValidationError(e.to_string()))?;

        if self.user_repo.email_exists(&request.email).await? {
            return Err(AuthError::EmailAlreadyExists);
        }

        // Bcrypt is CPU-bound; run it off the async scheduler
        let password = request.password.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || PasswordService::hash_password(&password))
                .await
                .map_err(|e| {
                    error!("Hashing task failed: {}", e);
                    AuthError::PasswordHashError
                })??;

        let user = self
            .user_repo
            .create_user(&request.username, &request.email, &password_hash)
            .await?;

        info!("Registered user {} ({})", user.id, user.email);
        self.issue_tokens(user)
    }

    /// Login with email and password and issue a token pair
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        request
            .validate()
            .map_err(|e| AuthError::ValidationError(e.to_string()))?;

        let user = self
            .user_repo
            .find_by_email(&request.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = request.password;
        let password_hash = user.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || {
                PasswordService::verify_password(&password, &password_hash)
            })
            .await
            .map_err(|e| {
                error!("Verification task failed: {}", e);
                AuthError::PasswordHashError
            })?;

        if !matches || !user.is_active {
            return Err(AuthError::InvalidCredentials);
        }

        info!("User {} logged in", user.id);
        self.issue_tokens(user)
    }

    /// Exchange a refresh token for a fresh token pair
    ///
    /// Stateless: the presented refresh token stays valid until its expiry.
    /// A subject whose user no longer exists is rejected like a bad token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthResponse, AuthError> {
        let claims = self
            .token_service
            .verify_token(refresh_token, TokenType::Refresh)?;

        let user_id: i32 = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or(AuthError::InvalidToken)?;

        self.issue_tokens(user)
    }

    /// Get the current user's profile
    pub async fn current_user(&self, user_id: i32) -> Result<UserResponse, AuthError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        Ok(user.into())
    }

    fn issue_tokens(&self, user: User) -> Result<AuthResponse, AuthError> {
        let pair = self
            .token_service
            .create_token_response(&user.id.to_string(), None)?;

        Ok(AuthResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            user: user.into(),
        })
    }
}
