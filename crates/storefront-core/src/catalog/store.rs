//! Product catalog store.

use serde::{Deserialize, Serialize};
use std::fmt;
use storefront_data::FetchError;

use crate::catalog::{CatalogSource, Product};
use crate::ids::ProductId;

/// Message recorded when a failed fetch carries no text of its own.
pub const FETCH_FAILED_FALLBACK: &str = "Failed to fetch products";

/// Lifecycle of the most recent catalog fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FetchStatus {
    /// No fetch has been attempted yet.
    #[default]
    NotStarted,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Loaded,
    /// The last fetch failed; see [`CatalogStore::error`].
    Failed,
}

impl FetchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStatus::NotStarted => "not-started",
            FetchStatus::Loading => "loading",
            FetchStatus::Loaded => "loaded",
            FetchStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holds the fetched product collection and the fetch lifecycle.
///
/// Invariant: `error` is `Some` exactly when `status` is
/// [`FetchStatus::Failed`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogStore {
    items: Vec<Product>,
    status: FetchStatus,
    error: Option<String>,
    search_term: String,
}

impl CatalogStore {
    /// Create an empty store that has not fetched yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `items`, as if a fetch had succeeded.
    pub fn loaded(items: Vec<Product>) -> Self {
        Self {
            items,
            status: FetchStatus::Loaded,
            ..Self::default()
        }
    }

    /// Products in provider order.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    /// Error text of the last failed fetch.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Whether nothing has been fetched yet. Callers check this before
    /// dispatching a fetch; the store itself does not de-duplicate.
    pub fn needs_fetch(&self) -> bool {
        self.status == FetchStatus::NotStarted
    }

    /// Look up a product for the detail view.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.items.iter().find(|p| &p.id == id)
    }

    /// Replace the transient search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// First half of a fetch: mark the store as loading.
    pub fn begin_fetch(&mut self) {
        tracing::debug!(previous = %self.status, "catalog fetch started");
        self.status = FetchStatus::Loading;
        self.error = None;
    }

    /// Second half of a fetch: apply the provider's result.
    ///
    /// Applied unconditionally, whatever happened to the store in between.
    /// On failure the previously held items are kept.
    pub fn finish_fetch(&mut self, result: Result<Vec<Product>, FetchError>) {
        match result {
            Ok(items) => {
                tracing::debug!(count = items.len(), "catalog fetch succeeded");
                self.items = items;
                self.status = FetchStatus::Loaded;
                self.error = None;
            }
            Err(e) => {
                let mut message = e.to_string();
                if message.trim().is_empty() {
                    message = FETCH_FAILED_FALLBACK.to_string();
                }
                tracing::warn!(error = %message, "catalog fetch failed");
                self.status = FetchStatus::Failed;
                self.error = Some(message);
            }
        }
    }

    /// Fetch the catalog from `source`: loading, then loaded or failed.
    ///
    /// Holds `&mut self` across the request. Callers that need to read the
    /// store while the request is outstanding should use
    /// [`begin_fetch`](Self::begin_fetch) and
    /// [`finish_fetch`](Self::finish_fetch) directly.
    pub async fn fetch_catalog<S: CatalogSource + ?Sized>(&mut self, source: &S) {
        self.begin_fetch();
        let result = source.fetch_products().await;
        self.finish_fetch(result);
    }
}
