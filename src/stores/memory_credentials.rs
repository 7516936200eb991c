use crate::stores::credential_store::{
    seed_credentials, CredentialMap, CredentialStore, StoredCredential,
};
use anyhow::Result;
use dashmap::DashMap;

/// In-memory credential store, seeded with the default account
///
/// Used when no persistence is wanted (tests, throwaway instances).
pub struct MemoryCredentialStore {
    users: DashMap<String, StoredCredential>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        let users = DashMap::new();
        for (username, credential) in seed_credentials() {
            users.insert(username, credential);
        }
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> CredentialMap {
        self.users
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    fn get(&self, username: &str) -> Option<StoredCredential> {
        self.users.get(username).map(|entry| entry.value().clone())
    }

    fn put(&self, username: &str, password: &str) -> Result<()> {
        self.users
            .insert(username.to_string(), StoredCredential::from_password(password));
        Ok(())
    }
}
