use rand::Rng;

const SALT_LEN: usize = 16;

/// Constant-time string comparison, used for API keys and password digests
pub fn constant_time_eq(provided: &str, expected: &str) -> bool {
    provided.as_bytes().len() == expected.as_bytes().len()
        && provided
            .as_bytes()
            .iter()
            .zip(expected.as_bytes().iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Verify the admin API key
pub fn verify_api_key(provided: &str, expected: &str) -> bool {
    !expected.is_empty() && constant_time_eq(provided, expected)
}

/// Generate a random hex-encoded salt
pub fn generate_salt() -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill(&mut salt[..]);
    hex::encode(salt)
}

/// Hash a password with the given hex salt
///
/// Salt and password are fed to BLAKE3 with a length prefix on the salt so
/// that ("ab", "c") and ("a", "bc") never collide.
///
/// This is a single fast hash, not a password KDF: the salt defeats
/// precomputed tables but a leaked credential file can still be brute forced
/// quickly. Moving to a stretched hash (argon2, scrypt) changes the stored
/// format and needs existing accounts to re-register.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(salt.len() as u64).to_le_bytes());
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher.finalize().to_hex().to_string()
}

pub fn verify_password(salt: &str, expected_hash: &str, password: &str) -> bool {
    constant_time_eq(&hash_password(salt, password), expected_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_api_key_valid() {
        assert!(verify_api_key("test-key", "test-key"));
    }

    #[test]
    fn test_verify_api_key_invalid() {
        assert!(!verify_api_key("wrong-key", "test-key"));
    }

    #[test]
    fn test_verify_api_key_different_length() {
        assert!(!verify_api_key("short", "much-longer-key"));
    }

    #[test]
    fn test_verify_api_key_empty_expected_never_matches() {
        assert!(!verify_api_key("", ""));
    }

    #[test]
    fn test_constant_time_eq_case_sensitive() {
        assert!(!constant_time_eq("Test-Key", "test-key"));
        assert!(constant_time_eq("", ""));
    }

    #[test]
    fn test_salt_is_random_hex() {
        let a = generate_salt();
        let b = generate_salt();
        assert_eq!(a.len(), SALT_LEN * 2);
        assert!(hex::decode(&a).is_ok());
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_password_depends_on_salt() {
        let h1 = hash_password("00ff", "admin123");
        let h2 = hash_password("ff00", "admin123");
        assert_ne!(h1, h2);
        assert_eq!(h1, hash_password("00ff", "admin123"));
    }

    #[test]
    fn test_verify_password() {
        let salt = generate_salt();
        let hash = hash_password(&salt, "p1");
        assert!(verify_password(&salt, &hash, "p1"));
        assert!(!verify_password(&salt, &hash, "p2"));
        assert!(!verify_password(&salt, &hash, ""));
    }
}
