//! Visibility filters.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Selected brand and model tokens.
///
/// Empty lists mean "no restriction". Within a list any token may match;
/// across the search term, brands and models all must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    /// Selected brands, in selection order.
    pub brands: Vec<String>,
    /// Selected models, in selection order.
    pub models: Vec<String>,
}

impl Filters {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `brand`, or deselect it if already selected.
    pub fn toggle_brand(&mut self, brand: &str) {
        toggle(&mut self.brands, brand);
    }

    /// Select `model`, or deselect it if already selected.
    pub fn toggle_model(&mut self, model: &str) {
        toggle(&mut self.models, model);
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty() && self.models.is_empty()
    }

    /// Whether `product` is visible under `search_term` and these filters.
    ///
    /// All comparisons are case-insensitive substring matches on the name.
    pub fn matches(&self, product: &Product, search_term: &str) -> bool {
        let name = product.name.to_lowercase();
        name.contains(&search_term.to_lowercase())
            && any_token_in(&name, &self.brands)
            && any_token_in(&name, &self.models)
    }

    /// The visible set: products passing [`matches`](Self::matches), in
    /// catalog order.
    pub fn apply<'a>(&self, products: &'a [Product], search_term: &str) -> Vec<&'a Product> {
        products
            .iter()
            .filter(|p| self.matches(p, search_term))
            .collect()
    }
}

fn toggle(selected: &mut Vec<String>, token: &str) {
    if let Some(index) = selected.iter().position(|t| t == token) {
        selected.remove(index);
    } else {
        selected.push(token.to_string());
    }
}

fn any_token_in(name_lower: &str, tokens: &[String]) -> bool {
    tokens.is_empty()
        || tokens
            .iter()
            .any(|t| name_lower.contains(&t.to_lowercase()))
}
