//! Product catalog module.
//!
//! Contains the product type, the catalog store and catalog providers.

mod product;
mod source;
mod store;

pub use product::{parse_timestamp, Product};
pub use source::{CatalogSource, HttpCatalog, DEFAULT_CATALOG_ENDPOINT};
pub use store::{CatalogStore, FetchStatus, FETCH_FAILED_FALLBACK};

#[cfg(test)]
pub(crate) use product::fixtures;
