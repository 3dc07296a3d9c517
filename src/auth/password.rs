// src/auth/password.rs
use crate::errors::ServerError;

// Same work factor the original deployment used.
const BCRYPT_COST: u32 = 10;

pub fn hash_password(password: &str) -> Result<String, ServerError> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| ServerError::DbError(format!("hash password failed: {e}")))
}

/// A hash that fails to parse counts as a non-match rather than an error;
/// callers treat both the same way (invalid credentials).
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hash = hash_password("hunter2secret").unwrap();
        assert!(verify_password("hunter2secret", &hash));
        assert!(!verify_password("hunter2wrong", &hash));
    }

    #[test]
    fn garbage_hash_does_not_verify() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }
}
