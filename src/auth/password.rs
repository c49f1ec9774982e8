//! Password hashing with bcrypt

use crate::auth::AuthResult;

/// Hash a password with the given bcrypt cost
pub fn hash_password(password: &str, cost: u32) -> AuthResult<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Verify a password against a stored hash
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be verified");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Lowest cost bcrypt accepts, keeps the tests fast
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("s3cret!", TEST_COST).unwrap();
        assert_ne!(hash, "s3cret!");
        assert!(verify_password("s3cret!", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same", TEST_COST).unwrap();
        let b = hash_password("same", TEST_COST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_is_mismatch() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }
}
