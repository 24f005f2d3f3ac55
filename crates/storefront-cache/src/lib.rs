//! Type-safe durable Key-Value storage for the storefront.
//!
//! Provides a small byte-level [`KeyValueStore`] abstraction with an
//! in-memory and a directory-backed implementation, plus a [`Cache`]
//! wrapper that handles JSON serialization.
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("cart", &vec![1, 2, 3]).unwrap();
//! let cart: Option<Vec<u32>> = cache.get("cart").unwrap();
//! assert_eq!(cart, Some(vec![1, 2, 3]));
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
