//! Key-value storage capability and the bundled backends.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Failures surfaced by a store or by (de)serializing a record.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store i/o: {0}")]
    Io(#[from] io::Error),
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Minimal storage capability the engine depends on.
///
/// Values are opaque strings (JSON in practice). `get` of an absent key is
/// `Ok(None)`; `delete` of an absent key succeeds.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and embedding callers with their own storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed store: one JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store under `~/.grimoire/`, creating the directory if needed.
    pub fn new() -> Result<Self, StoreError> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine home directory",
            )
        })?;
        Self::with_dir(home_dir.join(".grimoire"))
    }

    /// Store under an explicit directory, creating it if needed.
    pub fn with_dir(dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are dotted identifiers; keep anything path-hostile out of
        // the filename.
        let safe: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        debug!(key, path = %path.display(), "writing store record");
        fs::write(path, value)?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.get("a").unwrap().is_none());
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
        store.delete("a").unwrap();
        assert!(store.get("a").unwrap().is_none());
    }

    #[test]
    fn test_memory_store_delete_missing_is_ok() {
        let mut store = MemoryStore::new();
        assert!(store.delete("missing").is_ok());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::with_dir(dir.path().to_path_buf()).unwrap();
        assert!(store.get("rewards.alice").unwrap().is_none());
        store.set("rewards.alice", "{\"gold\":5}").unwrap();
        assert_eq!(
            store.get("rewards.alice").unwrap().as_deref(),
            Some("{\"gold\":5}")
        );
        store.delete("rewards.alice").unwrap();
        assert!(store.get("rewards.alice").unwrap().is_none());
        // Deleting again stays fine
        assert!(store.delete("rewards.alice").is_ok());
    }

    #[test]
    fn test_file_store_sanitizes_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::with_dir(dir.path().to_path_buf()).unwrap();
        store.set("weird/../key", "v").unwrap();
        assert_eq!(store.get("weird/../key").unwrap().as_deref(), Some("v"));
        // The record landed inside the store directory
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
