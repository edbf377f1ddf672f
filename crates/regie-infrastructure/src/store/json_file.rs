//! JSON-file-backed store.
//!
//! The whole key-value map is persisted as one pretty-printed JSON document
//! on every write, so a fresh process opening the same path resumes exactly
//! where the last one left off - the application's "survives reloads"
//! contract.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use regie_core::error::{RegieError, Result};
use regie_core::store::{LocalStore, StoreChange};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::Shared;

/// A persistent store rooted at one JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    shared: Arc<Shared>,
    path: Arc<PathBuf>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading the existing document if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the parent directory cannot be created.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let map: HashMap<String, String> = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            shared: Arc::new(Shared::new(map)),
            path: Arc::new(path),
        })
    }

    /// A new handle onto this store, with its own origin id.
    pub fn handle(&self) -> JsonFileStoreHandle {
        JsonFileStoreHandle {
            shared: self.shared.clone(),
            path: self.path.clone(),
            origin: Uuid::new_v4(),
        }
    }
}

/// One execution context's view of a [`JsonFileStore`].
#[derive(Clone)]
pub struct JsonFileStoreHandle {
    shared: Arc<Shared>,
    path: Arc<PathBuf>,
    origin: Uuid,
}

impl JsonFileStoreHandle {
    /// Writes the snapshot through a sibling temp file so a crash mid-write
    /// never truncates the live document.
    async fn persist(&self, snapshot: &HashMap<String, String>) -> Result<()> {
        let contents = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, contents).await?;
        tokio::fs::rename(&tmp, self.path.as_ref())
            .await
            .map_err(|e| RegieError::store(format!("replacing {:?} failed: {}", self.path, e)))?;
        Ok(())
    }
}

#[async_trait]
impl LocalStore for JsonFileStoreHandle {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.shared.read(key).await)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let snapshot = self
            .shared
            .write(self.origin, key, Some(value.to_string()))
            .await;
        self.persist(&snapshot).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let snapshot = self.shared.write(self.origin, key, None).await;
        self.persist(&snapshot).await
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<StoreChange> {
        self.shared.subscribe_excluding(self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        {
            let store = JsonFileStore::open(&path).await.unwrap();
            let handle = store.handle();
            handle.set("rememberedEmail", "a@b.com").await.unwrap();
            handle.set("sessionLocked", "1").await.unwrap();
            handle.remove("sessionLocked").await.unwrap();
        }

        // A second process opening the same path sees the final state
        let reopened = JsonFileStore::open(&path).await.unwrap();
        let handle = reopened.handle();
        assert_eq!(
            handle.get("rememberedEmail").await.unwrap(),
            Some("a@b.com".to_string())
        );
        assert_eq!(handle.get("sessionLocked").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("fresh/store.json"))
            .await
            .unwrap();
        assert_eq!(store.handle().get("anything").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let err = JsonFileStore::open(&path).await.unwrap_err();
        assert!(err.is_serialization());
    }

    #[tokio::test]
    async fn test_handles_notify_across_same_root() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("store.json"))
            .await
            .unwrap();
        let a = store.handle();
        let b = store.handle();
        let mut b_rx = b.subscribe();

        a.set("logoutOnNextBoot", "1").await.unwrap();

        let change = tokio::time::timeout(std::time::Duration::from_secs(1), b_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(change.key, "logoutOnNextBoot");
    }
}
