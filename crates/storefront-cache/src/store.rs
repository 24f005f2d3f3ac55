//! Raw byte-level Key-Value backends.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::CacheError;

/// A durable byte-oriented Key-Value store.
///
/// Implementations are expected to make `set` visible to the next `get`
/// on the same store, so a write that returned `Ok` is never lost by a
/// subsequent read in the same process.
pub trait KeyValueStore {
    /// Read the raw bytes stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Replace the bytes stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }

    /// List all keys, sorted.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        (**self).keys()
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        (**self).keys()
    }
}

/// In-process store. Nothing survives the process; used in tests and as a
/// fallback when no storage directory is configured.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, BTreeMap<String, Vec<u8>>>, CacheError> {
        self.entries
            .lock()
            .map_err(|_| CacheError::StoreError("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.entries()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.entries()?.keys().cloned().collect())
    }
}

/// Directory-backed store: one `<key>.json` file per key.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", root.display(), e)))?;
        Ok(Self { root })
    }

    /// Directory holding the store's files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.json", key.replace(':', "__"))))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        tracing::trace!(key, bytes = value.len(), "wrote store entry");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let name = entry?.file_name();
            let name = name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".json") {
                keys.push(stem.replace("__", ":"));
            }
        }
        keys.sort();
        Ok(keys)
    }
}
