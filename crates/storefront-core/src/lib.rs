//! Storefront domain logic.
//!
//! - **Catalog**: products fetched from a remote provider, with the fetch
//!   lifecycle and a transient search term
//! - **Cart**: lines with quantities, persisted to durable storage after
//!   every mutation
//! - **Search**: the listing view derived from both (filters, facets,
//!   sorting, pagination)
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_core::prelude::*;
//! use storefront_cache::MemoryStore;
//!
//! let mut catalog = CatalogStore::new();
//! catalog.fetch_catalog(&HttpCatalog::new(FetchClient::new()?, DEFAULT_CATALOG_ENDPOINT)).await;
//!
//! let mut cart = CartStore::new(MemoryStore::new());
//! cart.load_persisted();
//! if let Some(product) = catalog.items().first() {
//!     let event = cart.add_item(product);
//!     println!("{}", event.notification().unwrap_or_default());
//! }
//! println!("Total: {}", cart.totals().total_price.display(Currency::TRY));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod search;

pub use error::StorefrontError;
pub use ids::ProductId;
pub use money::{Currency, Price, PriceError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::StorefrontError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Price};

    // Catalog
    pub use crate::catalog::{
        CatalogSource, CatalogStore, FetchStatus, HttpCatalog, Product, DEFAULT_CATALOG_ENDPOINT,
    };

    // Cart
    pub use crate::cart::{CartEvent, CartLine, CartStore, CartTotals};

    // Search
    pub use crate::search::{
        Facets, Filters, ListingQuery, ListingView, Pagination, SortOption, PAGE_SIZE,
    };
}

#[cfg(test)]
mod tests {
    use crate::catalog::fixtures::product;
    use crate::prelude::*;
    use async_trait::async_trait;
    use storefront_cache::MemoryStore;
    use storefront_data::FetchError;
    use tokio::sync::Notify;

    /// A provider that does not answer until released.
    struct GatedSource {
        gate: Notify,
        products: Vec<Product>,
    }

    #[async_trait]
    impl CatalogSource for GatedSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
            self.gate.notified().await;
            Ok(self.products.clone())
        }
    }

    #[tokio::test]
    async fn test_cart_mutations_proceed_during_outstanding_fetch() {
        let source = GatedSource {
            gate: Notify::new(),
            products: vec![product("1", "Apple iPhone13", "100", 1)],
        };
        let mut catalog = CatalogStore::new();
        let mut cart = CartStore::new(MemoryStore::new());
        let in_cart = product("9", "Samsung Galaxy", "50", 2);

        tokio::join!(catalog.fetch_catalog(&source), async {
            cart.add_item(&in_cart);
            cart.add_item(&in_cart);
            source.gate.notify_one();
        });

        assert_eq!(catalog.status(), FetchStatus::Loaded);
        assert_eq!(catalog.items().len(), 1);
        assert_eq!(cart.totals().item_count, 2);
    }

    #[test]
    fn test_listing_and_cart_share_products() {
        let catalog = CatalogStore::loaded(vec![
            product("1", "Apple iPhone13", "100", 1),
            product("2", "Samsung Galaxy", "50", 2),
        ]);
        let facets = Facets::from_products(catalog.items());
        let view = ListingView::from_catalog(
            &catalog,
            &facets,
            &ListingQuery::new().with_sort(SortOption::PriceAsc),
        );

        let mut cart = CartStore::new(MemoryStore::new());
        for item in &view.items {
            cart.add_item(item);
        }

        let totals = cart.totals();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_price.display_amount(), "150.00");
        assert_eq!(cart.lines()[0].product.name, "Samsung Galaxy");
    }
}
