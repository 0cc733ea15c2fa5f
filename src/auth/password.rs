// Password hashing and verification service

use crate::auth::error::AuthError;
use tracing::error;

/// Bcrypt work factor (12 keeps verification in the tens-of-milliseconds range)
const HASH_COST: u32 = 12;

/// Minimum password length in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in bytes (bcrypt input limit)
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Password service for hashing and verification
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using bcrypt
    ///
    /// Rejects passwords shorter than 8 characters or longer than 72 bytes
    /// before hashing. Each call generates a fresh random salt, so hashing
    /// the same password twice yields different strings.
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::InvalidPasswordFormat(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(AuthError::InvalidPasswordFormat(format!(
                "Password must be at most {} bytes long",
                MAX_PASSWORD_BYTES
            )));
        }

        bcrypt::hash(password, HASH_COST).map_err(|e| {
            error!("Password hashing failed: {}", e);
            AuthError::PasswordHashError
        })
    }

    /// Verify a password against a stored hash
    ///
    /// Returns true only on an exact match. A malformed stored hash or an
    /// internal bcrypt error is logged and treated as a non-match.
    pub fn verify_password(password: &str, hash: &str) -> bool {
        match bcrypt::verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                error!("Password verification error: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = PasswordService::hash_password("longenough1").unwrap();
        assert!(PasswordService::verify_password("longenough1", &hash));
        assert!(!PasswordService::verify_password("wrongpass12", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = PasswordService::hash_password("longenough1").unwrap();
        let second = PasswordService::hash_password("longenough1").unwrap();

        // Different salts, different strings, both verify
        assert_ne!(first, second);
        assert!(PasswordService::verify_password("longenough1", &first));
        assert!(PasswordService::verify_password("longenough1", &second));
    }

    #[test]
    fn test_hash_embeds_algorithm_and_cost() {
        let hash = PasswordService::hash_password("longenough1").unwrap();
        assert!(hash.starts_with("$2"));
        assert!(hash.contains("$12$"));
    }

    #[test]
    fn test_short_password_is_rejected() {
        let result = PasswordService::hash_password("short07");
        assert!(matches!(
            result,
            Err(AuthError::InvalidPasswordFormat(_))
        ));
    }

    #[test]
    fn test_minimum_length_password_is_accepted() {
        let hash = PasswordService::hash_password("exactly8").unwrap();
        assert!(PasswordService::verify_password("exactly8", &hash));
    }

    #[test]
    fn test_oversized_password_is_rejected() {
        let oversized = "a".repeat(MAX_PASSWORD_BYTES + 1);
        let result = PasswordService::hash_password(&oversized);
        assert!(matches!(
            result,
            Err(AuthError::InvalidPasswordFormat(_))
        ));

        // 72 bytes is still inside the limit
        let at_limit = "a".repeat(MAX_PASSWORD_BYTES);
        assert!(PasswordService::hash_password(&at_limit).is_ok());
    }

    #[test]
    fn test_malformed_hash_is_a_non_match() {
        assert!(!PasswordService::verify_password("longenough1", "not-a-bcrypt-hash"));
        assert!(!PasswordService::verify_password("longenough1", ""));
    }
}
