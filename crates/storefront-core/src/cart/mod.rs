//! Shopping cart module.
//!
//! Contains the cart store, its lines and derived totals.

mod line;
mod store;
mod totals;

pub use line::CartLine;
pub use store::{CartEvent, CartStore, CART_STORAGE_KEY};
pub use totals::CartTotals;
