//! Durable snapshot storage for draft recovery.
//!
//! A snapshot is a single JSON record under a fixed key, holding the
//! non-file-blob subset of the draft (blob fields are serde-skipped by the
//! model). Absent or corrupt snapshots load as `None` rather than errors:
//! the worst case of a broken snapshot is starting from a blank draft.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tokio::fs;

use souk_core::models::Draft;

/// Snapshot storage errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Invalid snapshot key: {0}")]
    InvalidKey(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Durable key-value storage for draft snapshots.
///
/// All backends must treat a missing or unparseable snapshot as `Ok(None)`
/// on load; corruption is logged and discarded, never surfaced.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the snapshot under `key`, if a readable one exists.
    async fn load(&self, key: &str) -> SnapshotResult<Option<Draft>>;

    /// Persist the draft under `key`, replacing any previous snapshot.
    async fn save(&self, key: &str, draft: &Draft) -> SnapshotResult<()>;

    /// Remove the snapshot under `key`. Clearing an absent key is not an error.
    async fn clear(&self, key: &str) -> SnapshotResult<()>;
}

/// Local filesystem snapshot storage: one `{key}.json` file per key under a
/// base directory.
#[derive(Clone)]
pub struct LocalSnapshotStore {
    base_path: PathBuf,
}

impl LocalSnapshotStore {
    pub async fn new(base_path: impl Into<PathBuf>) -> SnapshotResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            SnapshotError::ConfigError(format!(
                "Failed to create snapshot directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalSnapshotStore { base_path })
    }

    /// Convert a snapshot key to a filesystem path, rejecting keys that
    /// could escape the base directory.
    fn key_to_path(&self, key: &str) -> SnapshotResult<PathBuf> {
        if key.is_empty()
            || key.contains("..")
            || key.contains('/')
            || key.contains('\\')
            || key.starts_with('.')
        {
            return Err(SnapshotError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(format!("{key}.json")))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl SnapshotStore for LocalSnapshotStore {
    async fn load(&self, key: &str) -> SnapshotResult<Option<Draft>> {
        let path = self.key_to_path(key)?;
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&raw) {
            Ok(draft) => Ok(Some(draft)),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding corrupt draft snapshot");
                Ok(None)
            }
        }
    }

    async fn save(&self, key: &str, draft: &Draft) -> SnapshotResult<()> {
        let path = self.key_to_path(key)?;
        let body = serde_json::to_vec(draft)?;
        fs::write(&path, body).await?;
        Ok(())
    }

    async fn clear(&self, key: &str) -> SnapshotResult<()> {
        let path = self.key_to_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory snapshot storage for tests. Stores serialized JSON so the
/// corrupt-snapshot path can be exercised via `insert_raw`.
#[derive(Default)]
pub struct MemorySnapshotStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw (possibly invalid) snapshot body.
    pub fn insert_raw(&self, key: &str, body: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), body.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self, key: &str) -> SnapshotResult<Option<Draft>> {
        let raw = match self.entries.lock().unwrap().get(key) {
            Some(raw) => raw.clone(),
            None => return Ok(None),
        };
        match serde_json::from_str(&raw) {
            Ok(draft) => Ok(Some(draft)),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding corrupt draft snapshot");
                Ok(None)
            }
        }
    }

    async fn save(&self, key: &str, draft: &Draft) -> SnapshotResult<()> {
        let body = serde_json::to_string(draft)?;
        self.entries.lock().unwrap().insert(key.to_string(), body);
        Ok(())
    }

    async fn clear(&self, key: &str) -> SnapshotResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use souk_core::models::{AdType, PendingImage};

    fn sample_draft() -> Draft {
        let mut draft = Draft::blank();
        draft.title = "Chair".to_string();
        draft.select_type(AdType::Product);
        draft.images.push(PendingImage::new(
            "chair.jpg",
            "image/jpeg",
            Bytes::from_static(&[1, 2, 3]),
        ));
        draft
    }

    #[tokio::test]
    async fn local_round_trip_drops_blobs() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalSnapshotStore::new(dir.path()).await.unwrap();
        let draft = sample_draft();

        store.save("ad-draft", &draft).await.unwrap();
        let restored = store.load("ad-draft").await.unwrap().unwrap();

        assert_eq!(restored.title, draft.title);
        assert_eq!(restored.details, draft.details);
        assert!(restored.images.is_empty());
    }

    #[tokio::test]
    async fn local_missing_key_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalSnapshotStore::new(dir.path()).await.unwrap();
        assert!(store.load("ad-draft").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn local_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalSnapshotStore::new(dir.path()).await.unwrap();
        store.save("ad-draft", &sample_draft()).await.unwrap();
        store.clear("ad-draft").await.unwrap();
        store.clear("ad-draft").await.unwrap();
        assert!(store.load("ad-draft").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn local_rejects_traversal_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalSnapshotStore::new(dir.path()).await.unwrap();
        for key in ["../escape", "a/b", "", ".hidden"] {
            assert!(matches!(
                store.load(key).await,
                Err(SnapshotError::InvalidKey(_))
            ));
        }
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_discarded() {
        let store = MemorySnapshotStore::new();
        store.insert_raw("ad-draft", "{not json");
        assert!(store.load("ad-draft").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn memory_round_trip() {
        let store = MemorySnapshotStore::new();
        let draft = sample_draft();
        store.save("ad-draft", &draft).await.unwrap();
        let restored = store.load("ad-draft").await.unwrap().unwrap();
        assert_eq!(restored.details, draft.details);
        store.clear("ad-draft").await.unwrap();
        assert!(!store.contains("ad-draft"));
    }
}
