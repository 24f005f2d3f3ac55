//! Key-Value store wrapper with automatic serialization.

use crate::store::KeyValueStore;
use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache backed by any [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: KeyValueStore> Cache<S> {
    /// Wrap a byte-level store.
    ///
    /// # Example
    ///
    /// ```rust
    /// use storefront_cache::{Cache, MemoryStore};
    /// let cache = Cache::new(MemoryStore::new());
    /// ```
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and a `SerializeError` if the
    /// stored bytes do not decode as `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let lines: Option<Vec<CartLine>> = cache.get("cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("cart", &lines)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
