//! Cart line type.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Price;

/// One product's quantity entry within the cart.
///
/// Carries a snapshot of the product so totals can be computed from the
/// cart alone. Persisted flattened: the product's fields plus `quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product snapshot taken when the line was created.
    #[serde(flatten)]
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Create a line holding one unit of `product`.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price × quantity, unrounded.
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}
