//! Storage backends for the cart snapshot.
//!
//! - [`MemoryStorage`] - Process-local map, used in tests and embedders
//! - [`FileStorage`] - All keys in one JSON object file on disk

use async_trait::async_trait;
use marketcart_core::{CartStorage, CoreError};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::persistence::{remove_file_if_exists, save_json};

// ============================================================================
// Memory Storage
// ============================================================================

/// In-memory key-value storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with one key.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self {
            values: RwLock::new(values),
        }
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl CartStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CoreError> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn clear(&self) -> Result<(), CoreError> {
        self.values.write().await.clear();
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

// ============================================================================
// File Storage
// ============================================================================

/// Key-value storage persisted as a single JSON object file.
///
/// Each `set` rewrites the whole file atomically. Access from one process is
/// serialized through an internal lock; nothing coordinates between
/// processes.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Creates a storage backed by the file at `path`.
    ///
    /// The file is not touched until the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole map. A missing file is an empty map.
    async fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Storage file not found");
                Ok(BTreeMap::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl CartStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        Ok(map.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CoreError> {
        let _guard = self.lock.lock().await;
        let mut map = match self.read_map().await {
            Ok(map) => map,
            Err(StoreError::Serialization(e)) => {
                warn!(path = %self.path.display(), error = %e, "Storage file corrupt, starting fresh");
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        map.insert(key.to_string(), value);
        save_json(&self.path, &map).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), CoreError> {
        let _guard = self.lock.lock().await;
        remove_file_if_exists(&self.path).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_memory_get_set_clear() {
        let storage = MemoryStorage::new();
        assert!(storage.get("k").await.unwrap().is_none());

        storage.set("k", "v1".to_string()).await.unwrap();
        storage.set("k", "v2".to_string()).await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.len().await, 1);

        storage.clear().await.unwrap();
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_file_missing_reads_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("storage.json"));
        assert!(storage.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_set_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        FileStorage::new(&path)
            .set("k", "[1,2]".to_string())
            .await
            .unwrap();
        FileStorage::new(&path)
            .set("other", "x".to_string())
            .await
            .unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get("k").await.unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(reopened.get("other").await.unwrap().as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_file_clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        let storage = FileStorage::new(&path);

        storage.set("k", "v".to_string()).await.unwrap();
        assert!(path.exists());

        storage.clear().await.unwrap();
        assert!(!path.exists());
        assert!(storage.get("k").await.unwrap().is_none());

        // Clearing twice is fine
        storage.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_corrupt_get_errors_and_set_recovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let storage = FileStorage::new(&path);
        assert!(storage.get("k").await.is_err());

        storage.set("k", "v".to_string()).await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
