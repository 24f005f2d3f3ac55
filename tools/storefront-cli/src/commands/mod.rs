//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod product;
pub mod products;

use clap::{Args, Subcommand};
use serde::Serialize;
use storefront_cache::KeyValueStore;
use storefront_core::cart::{CartLine, CartStore, CartTotals};
use storefront_core::Currency;

use crate::context::Context;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only products whose name contains this text.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Select a brand (repeatable; any selected brand matches).
    #[arg(short, long = "brand")]
    pub brands: Vec<String>,

    /// Select a model (repeatable; any selected model matches).
    #[arg(short, long = "model")]
    pub models: Vec<String>,

    /// Narrow the listed brand facets.
    #[arg(long)]
    pub brand_search: Option<String>,

    /// Narrow the listed model facets.
    #[arg(long)]
    pub model_search: Option<String>,

    /// Sort: priceAsc, priceDesc, "Old to new", "New to old" (or price-asc,
    /// price-desc, created-asc, created-desc).
    #[arg(long, default_value = "")]
    pub sort: String,

    /// Page to show (1-indexed).
    #[arg(short, long, default_value = "1")]
    pub page: usize,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: String,

    /// Also add one unit to the cart.
    #[arg(long)]
    pub add_to_cart: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add one unit of a product.
    Add {
        /// Product ID.
        id: String,
    },
    /// Remove a product's line.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Set a line's quantity; zero or less removes it.
    Set {
        /// Product ID.
        id: String,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
        /// Write storefront.json instead of storefront.toml.
        #[arg(long)]
        as_json: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Cart contents as printed in JSON mode.
#[derive(Serialize)]
pub struct CartSummary<'a> {
    pub lines: &'a [CartLine],
    #[serde(flatten)]
    pub totals: CartTotals,
}

impl<'a> CartSummary<'a> {
    pub fn of<S: KeyValueStore>(cart: &'a CartStore<S>) -> Self {
        Self {
            lines: cart.lines(),
            totals: cart.totals(),
        }
    }
}

/// Print the cart lines and total.
pub fn print_cart<S: KeyValueStore>(cart: &CartStore<S>, currency: Currency, ctx: &Context) {
    ctx.output.header("Cart");

    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let widths = [8, 28, 5, 12];
    ctx.output.table_row(&["ID", "PRODUCT", "QTY", "SUBTOTAL"], &widths);
    for line in cart.lines() {
        let quantity = line.quantity.to_string();
        let subtotal = line.line_total().display(currency);
        ctx.output.table_row(
            &[line.product_id().as_str(), &line.product.name, &quantity, &subtotal],
            &widths,
        );
    }

    print_cart_totals(&cart.totals(), currency, ctx);
}

/// Print the one-line cart summary shown under listings.
pub fn print_cart_totals(totals: &CartTotals, currency: Currency, ctx: &Context) {
    ctx.output.kv(
        "Cart",
        &format!(
            "{} item(s), total {}",
            totals.item_count,
            totals.total_price.display(currency)
        ),
    );
}
