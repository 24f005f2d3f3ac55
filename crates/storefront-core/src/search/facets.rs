//! Brand and model facets derived from product names.

use crate::catalog::Product;

/// Distinct brand tokens in first-appearance order.
///
/// Deduplication is case-sensitive: "Apple" and "apple" are two brands.
pub fn brand_facets(products: &[Product]) -> Vec<String> {
    distinct(products.iter().filter_map(Product::brand))
}

/// Distinct model tokens in first-appearance order.
pub fn model_facets(products: &[Product]) -> Vec<String> {
    distinct(products.iter().filter_map(Product::model))
}

/// Narrow a facet list to entries containing `term`, case-insensitively.
pub fn search_facets<'a>(facets: &'a [String], term: &str) -> Vec<&'a str> {
    let term = term.to_lowercase();
    facets
        .iter()
        .filter(|f| f.to_lowercase().contains(&term))
        .map(String::as_str)
        .collect()
}

fn distinct<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in tokens {
        if !out.iter().any(|t| t == token) {
            out.push(token.to_string());
        }
    }
    out
}
