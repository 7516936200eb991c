use crate::stores::credential_store::{
    ensure_seed, seed_credentials, CredentialMap, CredentialStore, StoredCredential,
};
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Credential store persisted as a JSON map in a single file
///
/// Every `put` reads the whole file, updates one entry and rewrites the file
/// through a temp file + rename. Writers within this process are serialized
/// by `write_lock`; separate processes sharing the file still race and the
/// last writer wins.
///
/// Reads degrade to the seed account when the file cannot be read or parsed.
/// Writes do not: `put` fails and leaves such a file untouched.
pub struct FileCredentialStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Option<CredentialMap>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .context(format!("Failed to read credential file: {}", self.path.display()))?;

        let map: CredentialMap = serde_json::from_str(&content)
            .context(format!("Failed to parse credential file: {}", self.path.display()))?;

        Ok(Some(map))
    }

    fn write_map(&self, map: &CredentialMap) -> Result<()> {
        let tmp_path = self.path.with_extension("json.tmp");
        let content = serde_json::to_vec_pretty(map).context("Failed to serialize credentials")?;

        let mut file = fs::File::create(&tmp_path)
            .context(format!("Failed to create {}", tmp_path.display()))?;
        file.write_all(&content).context("Failed to write credentials")?;
        file.sync_all().context("Failed to flush credentials")?;

        fs::rename(&tmp_path, &self.path)
            .context(format!("Failed to replace {}", self.path.display()))?;

        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> CredentialMap {
        match self.read_map() {
            Ok(Some(mut map)) => {
                if ensure_seed(&mut map) {
                    debug!(path = %self.path.display(), "Seed account missing from credential file, restored in memory");
                }
                map
            }
            Ok(None) => seed_credentials(),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %format!("{:#}", e),
                    "Failed to load credentials, using default account only"
                );
                seed_credentials()
            }
        }
    }

    fn put(&self, username: &str, password: &str) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("Credential store lock poisoned"))?;

        let mut map = self.read_map()?.unwrap_or_else(seed_credentials);
        ensure_seed(&mut map);
        map.insert(username.to_string(), StoredCredential::from_password(password));
        self.write_map(&map)
    }
}
