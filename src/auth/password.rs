//! Password hashing for stored credentials

use bcrypt::{hash, verify, DEFAULT_COST};

/// Hash a plaintext password with bcrypt for storage
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Check a plaintext password against a stored bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hashed = hash_password("hunter22").unwrap();

        assert_ne!(hashed, "hunter22");
        assert!(verify_password("hunter22", &hashed).unwrap());
        assert!(!verify_password("hunter23", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("hunter22").unwrap();
        let b = hash_password("hunter22").unwrap();
        assert_ne!(a, b);
    }
}
