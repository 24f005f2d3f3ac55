//! The derived product listing.

use serde::Serialize;

use crate::catalog::{CatalogStore, Product};
use crate::search::facets::{brand_facets, model_facets, search_facets};
use crate::search::{ListingQuery, Pagination, PAGE_SIZE};

/// One page of the product listing, plus the facet lists beside it.
///
/// Derived on demand from the catalog, the search term and a
/// [`ListingQuery`]; holding one never changes anything.
#[derive(Debug, Clone, Serialize)]
pub struct ListingView<'a> {
    /// Products on the current page, filtered and sorted.
    pub items: Vec<&'a Product>,
    /// Number of visible products across all pages.
    pub visible_count: usize,
    pub pagination: Pagination,
    /// Brand facets from the whole catalog, narrowed by the brand search.
    pub brands: Vec<&'a str>,
    /// Model facets from the whole catalog, narrowed by the model search.
    pub models: Vec<&'a str>,
}

/// Facet lists computed once per catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub brands: Vec<String>,
    pub models: Vec<String>,
}

impl Facets {
    pub fn from_products(products: &[Product]) -> Self {
        Self {
            brands: brand_facets(products),
            models: model_facets(products),
        }
    }
}

impl<'a> ListingView<'a> {
    /// Filter, sort and paginate `products`.
    pub fn build(
        products: &'a [Product],
        facets: &'a Facets,
        search_term: &str,
        query: &ListingQuery,
    ) -> Self {
        let mut visible = query.filters.apply(products, search_term);
        query.sort.sort(&mut visible);

        let pagination = Pagination::new(query.page, PAGE_SIZE, visible.len());
        let items = pagination.slice(&visible).to_vec();

        Self {
            items,
            visible_count: visible.len(),
            pagination,
            brands: search_facets(&facets.brands, &query.brand_search),
            models: search_facets(&facets.models, &query.model_search),
        }
    }

    /// Build from a catalog store, using its search term.
    pub fn from_catalog(catalog: &'a CatalogStore, facets: &'a Facets, query: &ListingQuery) -> Self {
        Self::build(catalog.items(), facets, catalog.search_term(), query)
    }

    /// Whether the current page has nothing to show. The listing shows an
    /// empty-result indicator instead of pagination controls in that case.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
