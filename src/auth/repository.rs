// Database repository for users

use crate::auth::{error::AuthError, models::User};
use sqlx::PgPool;

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) \
             RETURNING id, username, email, password_hash, created_at, is_active",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::map_unique_violation)?;

        Ok(user)
    }

    /// Find a user by email (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at, is_active \
             FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at, is_active \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(user)
    }

    /// Check if an email exists
    pub async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(exists.0)
    }

    /// List all users, oldest first
    pub async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at, is_active \
             FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(users)
    }

    /// Update a user's fields, keeping existing values for omitted ones
    ///
    /// Returns None when no user with the given id exists.
    pub async fn update_user(
        &self,
        id: i32,
        username: Option<&str>,
        email: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users \
             SET username = COALESCE($1, username), \
                 email = COALESCE($2, email), \
                 password_hash = COALESCE($3, password_hash) \
             WHERE id = $4 \
             RETURNING id, username, email, password_hash, created_at, is_active",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::map_unique_violation)?;

        Ok(user)
    }

    /// Delete a user, returning whether a row was removed
    pub async fn delete_user(&self, id: i32) -> Result<bool, AuthError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Map a unique-constraint violation to the matching conflict error
    fn map_unique_violation(e: sqlx::Error) -> AuthError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return match db_err.constraint() {
                    Some(name) if name.contains("username") => AuthError::UsernameAlreadyExists,
                    _ => AuthError::EmailAlreadyExists,
                };
            }
        }
        AuthError::DatabaseError(e.to_string())
    }
}
