// Authentication configuration, read once at process startup

/// Immutable authentication configuration
///
/// Constructed once in main and passed into the token service. The same
/// secret signs and verifies every token in a deployment; rotating it
/// invalidates all outstanding tokens.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC signing secret (required, no default value)
    pub secret: String,
    /// Access token lifetime in minutes
    pub access_token_minutes: i64,
    /// Refresh token lifetime in days
    pub refresh_token_days: i64,
}

impl AuthConfig {
    /// Load configuration from environment variables
    ///
    /// `JWT_SECRET` is required. `ACCESS_TOKEN_EXPIRE_MINUTES` defaults to 30
    /// and `REFRESH_TOKEN_EXPIRE_DAYS` defaults to 7.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set in environment");

        let access_token_minutes = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .expect("ACCESS_TOKEN_EXPIRE_MINUTES must be an integer");

        let refresh_token_days = std::env::var("REFRESH_TOKEN_EXPIRE_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .expect("REFRESH_TOKEN_EXPIRE_DAYS must be an integer");

        Self {
            secret,
            access_token_minutes,
            refresh_token_days,
        }
    }
}
