//! Snapshot persistence with postcard

use crate::repository::{Repository, Store};
use crate::StorageError;
use std::fs;
use std::path::Path;
use tracing::info;

/// Format version written ahead of the store
const SNAPSHOT_VERSION: u8 = 1;

impl Repository {
    /// Serialize the whole store
    pub fn snapshot_bytes(&self) -> Result<Vec<u8>, StorageError> {
        let store = self.clone_store()?;
        let mut bytes = vec![SNAPSHOT_VERSION];
        let body = postcard::to_allocvec(&store)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        bytes.extend_from_slice(&body);
        Ok(bytes)
    }

    /// Rebuild a repository from [`Repository::snapshot_bytes`] output
    pub fn from_snapshot_bytes(bytes: &[u8]) -> Result<Self, StorageError> {
        let (version, body) = bytes
            .split_first()
            .ok_or_else(|| StorageError::SerializationError("empty snapshot".to_string()))?;
        if *version != SNAPSHOT_VERSION {
            return Err(StorageError::SerializationError(format!(
                "unsupported snapshot version {}",
                version
            )));
        }
        let store: Store = postcard::from_bytes(body)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        Ok(Self::from_store(store))
    }

    /// Write a snapshot file, replacing any previous one
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        let path = path.as_ref();
        let bytes = self.snapshot_bytes()?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        info!("Saved snapshot ({} bytes) to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Load a snapshot file, or start empty when the file does not exist
    pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No snapshot at {}, starting empty", path.display());
            return Ok(Self::new());
        }
        let bytes = fs::read(path)?;
        let repo = Self::from_snapshot_bytes(&bytes)?;
        info!("Loaded snapshot from {}", path.display());
        Ok(repo)
    }
}
