use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};
use synco_api::Credential;

use crate::config::SyncoConfig;

const SESSION_KEY: &str = "session";

/// Async key-value persistence scoped to this application.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

fn secure_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key);
        let value = value.to_string();
        tokio::task::spawn_blocking(move || secure_write(&path, &value))
            .await
            .context("Session write task panicked")?
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove {}", path.display()))
            }
        }
    }
}

/// Process-local store for dev mode and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// The single credential slot. Last write wins; a missing or blank entry
/// means unauthenticated.
#[derive(Clone)]
pub struct SessionStore {
    backing: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backing: impl KeyValueStore + 'static) -> Self {
        Self {
            backing: Arc::new(backing),
        }
    }

    /// Store kept next to the config file, surviving restarts.
    pub fn persistent() -> Result<Self> {
        Ok(Self::new(FileStore::new(SyncoConfig::root_dir()?)))
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    pub async fn set(&self, credential: &Credential) -> Result<()> {
        self.backing.set(SESSION_KEY, credential.as_str()).await
    }

    pub async fn get(&self) -> Result<Option<Credential>> {
        Ok(self
            .backing
            .get(SESSION_KEY)
            .await?
            .and_then(Credential::new))
    }

    pub async fn clear(&self) -> Result<()> {
        self.backing.remove(SESSION_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(s: &str) -> Credential {
        Credential::new(s).unwrap()
    }

    #[tokio::test]
    async fn empty_store_reads_as_absent() {
        let store = SessionStore::in_memory();
        assert_eq!(store.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn last_set_wins_and_clear_removes() {
        let store = SessionStore::in_memory();
        store.set(&token("first")).await.unwrap();
        store.set(&token("second")).await.unwrap();
        assert_eq!(store.get().await.unwrap(), Some(token("second")));

        store.clear().await.unwrap();
        assert_eq!(store.get().await.unwrap(), None);

        // Clearing again is fine.
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn file_store_survives_a_new_instance() {
        let dir = tempfile::tempdir().unwrap();

        SessionStore::new(FileStore::new(dir.path()))
            .set(&token("abc123"))
            .await
            .unwrap();

        let reopened = SessionStore::new(FileStore::new(dir.path()));
        assert_eq!(reopened.get().await.unwrap(), Some(token("abc123")));

        reopened.clear().await.unwrap();
        assert!(!dir.path().join(SESSION_KEY).exists());
        assert_eq!(reopened.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn blank_session_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SESSION_KEY), "  \n").unwrap();

        let store = SessionStore::new(FileStore::new(dir.path()));
        assert_eq!(store.get().await.unwrap(), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(FileStore::new(dir.path().join("nested")));
        store.set(&token("abc123")).await.unwrap();

        let mode = std::fs::metadata(dir.path().join("nested").join(SESSION_KEY))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
