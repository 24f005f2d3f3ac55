//! Listing query and sort options.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::catalog::Product;
use crate::search::Filters;

/// Sort options for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Keep catalog order.
    #[default]
    None,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by creation time, oldest first.
    CreatedAsc,
    /// Sort by creation time, newest first.
    CreatedDesc,
}

impl SortOption {
    /// Every option, in menu order.
    pub const ALL: [SortOption; 5] = [
        SortOption::None,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::CreatedAsc,
        SortOption::CreatedDesc,
    ];

    /// Parse a sort selection. Unknown or empty input means [`SortOption::None`].
    ///
    /// Accepts the storefront's menu values (`priceAsc`, `priceDesc`,
    /// `Old to new`, `New to old`) and kebab-case names.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "priceAsc" | "price-asc" => SortOption::PriceAsc,
            "priceDesc" | "price-desc" => SortOption::PriceDesc,
            "Old to new" | "created-asc" | "oldest" => SortOption::CreatedAsc,
            "New to old" | "created-desc" | "newest" => SortOption::CreatedDesc,
            _ => SortOption::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::None => "none",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::CreatedAsc => "created-asc",
            SortOption::CreatedDesc => "created-desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::None => "Default",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::CreatedAsc => "Old to new",
            SortOption::CreatedDesc => "New to old",
        }
    }

    /// Sort `products` in place. Stable: ties keep their relative order.
    pub fn sort(&self, products: &mut [&Product]) {
        match self {
            SortOption::None => {}
            SortOption::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOption::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOption::CreatedAsc => products.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortOption::CreatedDesc => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
    }
}

impl FromStr for SortOption {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortOption::parse(s))
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the listing view is derived from besides the catalog itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingQuery {
    /// Brand and model selections.
    pub filters: Filters,
    /// Sort option.
    pub sort: SortOption,
    /// Current page (1-indexed).
    pub page: usize,
    /// Narrows the brand facet list. Does not affect visibility.
    pub brand_search: String,
    /// Narrows the model facet list. Does not affect visibility.
    pub model_search: String,
}

impl ListingQuery {
    /// Create a query for page 1 with no filters.
    pub fn new() -> Self {
        Self {
            filters: Filters::new(),
            sort: SortOption::None,
            page: 1,
            brand_search: String::new(),
            model_search: String::new(),
        }
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Set the page. Pages start at 1.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_brand_search(mut self, term: impl Into<String>) -> Self {
        self.brand_search = term.into();
        self
    }

    pub fn with_model_search(mut self, term: impl Into<String>) -> Self {
        self.model_search = term.into();
        self
    }
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::product;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_parse_menu_values() {
        assert_eq!(SortOption::parse("priceAsc"), SortOption::PriceAsc);
        assert_eq!(SortOption::parse("priceDesc"), SortOption::PriceDesc);
        assert_eq!(SortOption::parse("Old to new"), SortOption::CreatedAsc);
        assert_eq!(SortOption::parse("New to old"), SortOption::CreatedDesc);
        assert_eq!(SortOption::parse("price-desc"), SortOption::PriceDesc);
    }

    #[test]
    fn test_parse_unknown_is_none() {
        assert_eq!(SortOption::parse(""), SortOption::None);
        assert_eq!(SortOption::parse("cheapest"), SortOption::None);
        assert_eq!("bogus".parse::<SortOption>(), Ok(SortOption::None));
    }

    #[test]
    fn test_as_str_parses_back() {
        for option in SortOption::ALL {
            assert_eq!(SortOption::parse(option.as_str()), option);
        }
    }

    #[test]
    fn test_price_sort_is_stable() {
        let products = vec![
            product("a", "X One", "20", 1),
            product("b", "X Two", "10", 2),
            product("c", "X Three", "20", 3),
            product("d", "X Four", "10", 4),
        ];
        let mut refs: Vec<&Product> = products.iter().collect();

        SortOption::PriceAsc.sort(&mut refs);
        assert_eq!(ids(&refs), vec!["b", "d", "a", "c"]);

        let mut refs: Vec<&Product> = products.iter().collect();
        SortOption::PriceDesc.sort(&mut refs);
        assert_eq!(ids(&refs), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_created_sort() {
        let products = vec![
            product("a", "X One", "1", 5),
            product("b", "X Two", "1", 2),
            product("c", "X Three", "1", 9),
        ];
        let mut refs: Vec<&Product> = products.iter().collect();

        SortOption::CreatedAsc.sort(&mut refs);
        assert_eq!(ids(&refs), vec!["b", "a", "c"]);
        SortOption::CreatedDesc.sort(&mut refs);
        assert_eq!(ids(&refs), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_none_keeps_catalog_order() {
        let products = vec![product("b", "X", "2", 2), product("a", "Y", "1", 1)];
        let mut refs: Vec<&Product> = products.iter().collect();
        SortOption::None.sort(&mut refs);
        assert_eq!(ids(&refs), vec!["b", "a"]);
    }

    #[test]
    fn test_with_page_clamps_to_one() {
        assert_eq!(ListingQuery::new().with_page(0).page, 1);
        assert_eq!(ListingQuery::new().with_page(3).page, 3);
    }
}
