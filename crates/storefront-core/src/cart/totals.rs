//! Cart totals.

use serde::Serialize;

use crate::cart::CartLine;
use crate::money::Price;

/// Item count and total price of a cart.
///
/// Always computed from the lines on demand; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct CartTotals {
    /// Sum of quantities across all lines.
    pub item_count: u64,
    /// Sum of price × quantity across all lines, unrounded.
    pub total_price: Price,
}

impl CartTotals {
    /// Compute totals for `lines`.
    pub fn from_lines(lines: &[CartLine]) -> Self {
        Self {
            item_count: lines.iter().map(|l| u64::from(l.quantity)).sum(),
            total_price: lines.iter().map(CartLine::line_total).sum(),
        }
    }
}
