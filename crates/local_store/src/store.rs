use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::error::LocalStoreError;
use crate::paths::key_file_name;

/// String key to JSON text, last write wins.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError>;

    fn remove(&self, key: &str) -> Result<(), LocalStoreError>;
}

/// One `<key>.json` file per key under a root directory, created on first
/// write.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, LocalStoreError> {
        key_file_name(key)
            .map(|file_name| self.root.join(file_name))
            .ok_or_else(|| LocalStoreError::InvalidKey {
                key: key.to_string(),
            })
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(LocalStoreError::io("reading stored value", &path, source)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError> {
        let path = self.key_path(key)?;
        fs::create_dir_all(&self.root)
            .map_err(|source| LocalStoreError::io("creating store directory", &self.root, source))?;
        fs::write(&path, value)
            .map_err(|source| LocalStoreError::io("writing stored value", &path, source))?;
        tracing::debug!(key, path = %path.display(), "stored value written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), LocalStoreError> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(LocalStoreError::io("removing stored value", &path, source)),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> MutexGuard<'_, HashMap<String, String>> {
        match self.values.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError> {
        Ok(self.values().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError> {
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), LocalStoreError> {
        self.values().remove(key);
        Ok(())
    }
}
