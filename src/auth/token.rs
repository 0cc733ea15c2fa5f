// JWT issuance and verification service

use std::collections::HashMap;
use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::config::AuthConfig;
use crate::auth::error::AuthError;

/// Token variant carried in the `type` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}

/// JWT claims structure
///
/// `sub`, `exp`, `iat` and `type` are the claims this service manages;
/// anything the caller supplies rides along in `extra` and is flattened
/// into the token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identifier). Absence surfaces at verification,
    /// not issuance.
    #[serde(default)]
    pub sub: String,
    /// Expiry, unix seconds UTC
    pub exp: i64,
    /// Issued at, unix seconds UTC
    pub iat: i64,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Application-defined claims, flattened into the payload
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Access/refresh token pair returned to login and registration callers
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// Token service for JWT operations
///
/// Signs and verifies with the same HS256 secret; both lifetimes come from
/// the immutable startup configuration.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    /// Create a new TokenService from the startup configuration
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            access_ttl: Duration::minutes(config.access_token_minutes),
            refresh_ttl: Duration::days(config.refresh_token_days),
        }
    }

    /// Create an access token for the subject
    ///
    /// `ttl` overrides the configured access lifetime when given. The
    /// caller's `extra` map is cloned into the token, never mutated.
    pub fn create_access_token(
        &self,
        subject: &str,
        extra: &HashMap<String, serde_json::Value>,
        ttl: Option<Duration>,
    ) -> Result<String, AuthError> {
        self.sign(subject, extra, TokenType::Access, ttl.unwrap_or(self.access_ttl))
    }

    /// Create a refresh token for the subject
    ///
    /// Always uses the configured refresh lifetime; there is no caller
    /// override.
    pub fn create_refresh_token(
        &self,
        subject: &str,
        extra: &HashMap<String, serde_json::Value>,
    ) -> Result<String, AuthError> {
        self.sign(subject, extra, TokenType::Refresh, self.refresh_ttl)
    }

    fn sign(
        &self,
        subject: &str,
        extra: &HashMap<String, serde_json::Value>,
        token_type: TokenType,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            token_type,
            extra: extra.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenCreationError(e.to_string()))
    }

    /// Verify a token and return its claims
    ///
    /// Fails with `ExpiredToken` past the `exp` instant (no clock-skew
    /// leeway), `TokenTypeMismatch` when the `type` claim differs from
    /// `expected_type`, `MissingSubject` when `sub` is absent or empty, and
    /// `InvalidToken` for any signature or format failure.
    pub fn verify_token(
        &self,
        token: &str,
        expected_type: TokenType,
    ) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => AuthError::InvalidToken,
            })?;

        if claims.token_type != expected_type {
            return Err(AuthError::TokenTypeMismatch {
                expected: expected_type,
                actual: claims.token_type,
            });
        }

        if claims.sub.is_empty() {
            return Err(AuthError::MissingSubject);
        }

        Ok(claims)
    }

    /// Create an access/refresh token pair for the subject
    pub fn create_token_response(
        &self,
        subject: &str,
        extra_claims: Option<&HashMap<String, serde_json::Value>>,
    ) -> Result<TokenPair, AuthError> {
        let extra = extra_claims.cloned().unwrap_or_default();

        let access_token = self.create_access_token(subject, &extra, None)?;
        let refresh_token = self.create_refresh_token(subject, &extra)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Helper to create a test token service
    fn test_token_service() -> TokenService {
        TokenService::new(&AuthConfig {
            secret: "test_secret_key_for_testing_purposes".to_string(),
            access_token_minutes: 30,
            refresh_token_days: 7,
        })
    }

    fn no_extra() -> HashMap<String, serde_json::Value> {
        HashMap::new()
    }

    #[test]
    fn test_access_token_round_trip() {
        let service = test_token_service();
        let token = service.create_access_token("u1", &no_extra(), None).unwrap();
        let claims = service.verify_token(&token, TokenType::Access).unwrap();

        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn test_access_token_expiration_is_30_minutes() {
        let service = test_token_service();
        let token = service.create_access_token("u1", &no_extra(), None).unwrap();
        let claims = service.verify_token(&token, TokenType::Access).unwrap();

        assert_eq!(claims.exp - claims.iat, 1800);
    }

    #[test]
    fn test_refresh_token_expiration_is_7_days() {
        let service = test_token_service();
        let token = service.create_refresh_token("u1", &no_extra()).unwrap();
        let claims = service.verify_token(&token, TokenType::Refresh).unwrap();

        assert_eq!(claims.exp - claims.iat, 604800);
    }

    #[test]
    fn test_ttl_override() {
        let service = test_token_service();
        let token = service
            .create_access_token("u1", &no_extra(), Some(Duration::minutes(5)))
            .unwrap();
        let claims = service.verify_token(&token, TokenType::Access).unwrap();

        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn test_token_type_mismatch_is_rejected() {
        let service = test_token_service();

        let access = service.create_access_token("u1", &no_extra(), None).unwrap();
        let result = service.verify_token(&access, TokenType::Refresh);
        assert!(matches!(
            result,
            Err(AuthError::TokenTypeMismatch {
                expected: TokenType::Refresh,
                actual: TokenType::Access,
            })
        ));

        let refresh = service.create_refresh_token("u1", &no_extra()).unwrap();
        let result = service.verify_token(&refresh, TokenType::Access);
        assert!(matches!(result, Err(AuthError::TokenTypeMismatch { .. })));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = test_token_service();
        let token = service
            .create_access_token("u1", &no_extra(), Some(Duration::seconds(-60)))
            .unwrap();

        let result = service.verify_token(&token, TokenType::Access);
        assert!(matches!(result, Err(AuthError::ExpiredToken)));
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let service = test_token_service();
        let token = service.create_access_token("u1", &no_extra(), None).unwrap();

        // Flip the last character of the signature segment
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        let result = service.verify_token(&tampered, TokenType::Access);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_missing_subject_is_rejected() {
        let service = test_token_service();
        let token = service.create_access_token("", &no_extra(), None).unwrap();

        let result = service.verify_token(&token, TokenType::Access);
        assert!(matches!(result, Err(AuthError::MissingSubject)));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let service = test_token_service();
        let other = TokenService::new(&AuthConfig {
            secret: "a_completely_different_secret".to_string(),
            access_token_minutes: 30,
            refresh_token_days: 7,
        });

        let token = other.create_access_token("u1", &no_extra(), None).unwrap();
        let result = service.verify_token(&token, TokenType::Access);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_extra_claims_round_trip() {
        let service = test_token_service();
        let mut extra = HashMap::new();
        extra.insert("role".to_string(), serde_json::json!("admin"));

        let token = service.create_access_token("u1", &extra, None).unwrap();
        let claims = service.verify_token(&token, TokenType::Access).unwrap();

        assert_eq!(claims.extra["role"], serde_json::json!("admin"));
        // The caller's map is untouched
        assert_eq!(extra.len(), 1);
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_token_service();

        for malformed in ["", "not.a.token", "invalid_token_format"] {
            let result = service.verify_token(malformed, TokenType::Access);
            assert!(matches!(result, Err(AuthError::InvalidToken)));
        }
    }

    #[test]
    fn test_create_token_response() {
        let service = test_token_service();
        let pair = service.create_token_response("42", None).unwrap();

        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert_ne!(pair.access_token, pair.refresh_token);
        assert_eq!(pair.token_type, "bearer");

        let access = service
            .verify_token(&pair.access_token, TokenType::Access)
            .unwrap();
        assert_eq!(access.sub, "42");
        assert_eq!(access.token_type, TokenType::Access);

        let refresh = service
            .verify_token(&pair.refresh_token, TokenType::Refresh)
            .unwrap();
        assert_eq!(refresh.sub, "42");
        assert_eq!(refresh.token_type, TokenType::Refresh);
    }

    #[test]
    fn test_type_claim_serializes_lowercase() {
        let claims = Claims {
            sub: "u1".to_string(),
            exp: 2,
            iat: 1,
            token_type: TokenType::Access,
            extra: HashMap::new(),
        };

        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("\"type\":\"access\""));
    }

    // Property-based tests using proptest

    proptest! {
        #[test]
        fn prop_subject_round_trips(sub in "[a-z0-9]{1,24}") {
            let service = test_token_service();
            let token = service.create_access_token(&sub, &no_extra(), None).unwrap();
            let claims = service.verify_token(&token, TokenType::Access).unwrap();
            prop_assert_eq!(claims.sub, sub);
        }

        #[test]
        fn prop_malformed_tokens_rejected(malformed in "[a-zA-Z0-9]{10,50}") {
            let service = test_token_service();
            let result = service.verify_token(&malformed, TokenType::Access);
            prop_assert!(result.is_err());
        }

        #[test]
        fn prop_access_never_verifies_as_refresh(sub in "[a-z0-9]{1,24}") {
            let service = test_token_service();
            let token = service.create_access_token(&sub, &no_extra(), None).unwrap();
            prop_assert!(service.verify_token(&token, TokenType::Refresh).is_err());
        }
    }
}
