use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::error::{Error, Result};

/// One-way hash with a fresh random salt per call; the salt travels inside
/// the PHC output string, so identical passwords never hash to the same
/// value twice.
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| Error::Internal(format!("password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// A malformed stored hash verifies as false rather than erroring; the
/// comparison itself is constant-time inside argon2.
pub fn verify_password(plain: &str, hashed: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hashed) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hash = hash_password("s3cret").unwrap();
        assert!(verify_password("s3cret", &hash));
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hash = hash_password("s3cret").unwrap();
        assert!(!verify_password("not-it", &hash));
    }

    #[test]
    fn identical_passwords_get_distinct_hashes() {
        let first = hash_password("same").unwrap();
        let second = hash_password("same").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("same", &first));
        assert!(verify_password("same", &second));
    }

    #[test]
    fn malformed_hash_verifies_false_instead_of_erroring() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }
}
