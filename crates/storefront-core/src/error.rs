//! Storefront error types.

use thiserror::Error;

use storefront_cache::CacheError;
use storefront_data::FetchError;

/// Errors that can occur in storefront operations.
///
/// Store mutations themselves never fail; these surface from the
/// boundaries (fetching, persistence) and from lookups the presentation
/// layer wants to report.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Catalog fetch failed.
    #[error("Catalog fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Durable storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persisted data violates a cart invariant.
    #[error("Invalid persisted cart: {0}")]
    InvalidPersistedCart(String),
}
