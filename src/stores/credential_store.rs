use crate::utils::auth::{generate_salt, hash_password, verify_password};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SEED_USERNAME: &str = "admin";
pub const SEED_PASSWORD: &str = "admin123";
// Fixed so that the default map is identical on every load
const SEED_SALT: &str = "5afec1a15eed5a175afec1a15eed0000";

/// Salted password digest as persisted by the credential stores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredential {
    pub salt: String,
    pub hash: String,
}

impl StoredCredential {
    pub fn from_password(password: &str) -> Self {
        let salt = generate_salt();
        let hash = hash_password(&salt, password);
        Self { salt, hash }
    }

    pub fn matches(&self, password: &str) -> bool {
        verify_password(&self.salt, &self.hash, password)
    }
}

pub type CredentialMap = HashMap<String, StoredCredential>;

/// The single-entry map used when nothing has been persisted yet
pub fn seed_credentials() -> CredentialMap {
    let mut map = CredentialMap::with_capacity(1);
    insert_seed(&mut map);
    map
}

/// Re-add the seed account if a persisted map lost it
pub fn ensure_seed(map: &mut CredentialMap) -> bool {
    if map.contains_key(SEED_USERNAME) {
        return false;
    }
    insert_seed(map);
    true
}

fn insert_seed(map: &mut CredentialMap) {
    map.insert(
        SEED_USERNAME.to_string(),
        StoredCredential {
            salt: SEED_SALT.to_string(),
            hash: hash_password(SEED_SALT, SEED_PASSWORD),
        },
    );
}

/// Username -> credential store
///
/// `put` overwrites any existing entry for the username. Entries are never
/// removed and the seed account is always present.
pub trait CredentialStore: Send + Sync {
    /// Full map of persisted credentials, or the seed map if none exist
    fn load(&self) -> CredentialMap;

    fn get(&self, username: &str) -> Option<StoredCredential> {
        self.load().remove(username)
    }

    /// Register or overwrite `username`
    fn put(&self, username: &str, password: &str) -> Result<()>;

    fn verify(&self, username: &str, password: &str) -> bool {
        self.get(username)
            .map(|credential| credential.matches(password))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_map_accepts_default_admin() {
        let map = seed_credentials();
        assert_eq!(map.len(), 1);
        assert!(map[SEED_USERNAME].matches(SEED_PASSWORD));
        assert!(!map[SEED_USERNAME].matches("admin"));
    }

    #[test]
    fn test_seed_map_is_stable() {
        assert_eq!(seed_credentials(), seed_credentials());
    }

    #[test]
    fn test_ensure_seed_restores_admin() {
        let mut map = CredentialMap::new();
        map.insert("alice".to_string(), StoredCredential::from_password("p1"));

        assert!(ensure_seed(&mut map));
        assert!(map.contains_key(SEED_USERNAME));
        assert!(!ensure_seed(&mut map));
    }

    #[test]
    fn test_stored_credential_never_holds_plaintext() {
        let credential = StoredCredential::from_password("hunter2");
        assert_ne!(credential.hash, "hunter2");
        assert!(!credential.hash.contains("hunter2"));
        assert!(credential.matches("hunter2"));
    }
}
