//! Product detail command.

use anyhow::Result;
use serde::Serialize;
use storefront_cache::KeyValueStore;
use storefront_core::cart::{CartEvent, CartStore};
use storefront_core::catalog::{CatalogStore, Product};
use storefront_core::ProductId;

use super::{print_cart_totals, CartSummary, ProductArgs};
use crate::context::Context;

#[derive(Serialize)]
struct ProductOutput<'a> {
    product: Option<&'a Product>,
    cart: CartSummary<'a>,
}

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let id = ProductId::new(args.id);
    let mut cart = ctx.open_cart()?;
    let catalog = ctx.fetch_catalog(None).await?;

    show(&catalog, &id, args.add_to_cart, &mut cart, ctx);
    Ok(())
}

/// Print the detail view for `id`, adding a unit to the cart if asked.
///
/// An unknown id is not an error: the view just says the product was not
/// found and the cart is left alone.
fn show<S: KeyValueStore>(
    catalog: &CatalogStore,
    id: &ProductId,
    add_to_cart: bool,
    cart: &mut CartStore<S>,
    ctx: &Context,
) -> Option<CartEvent> {
    let Some(product) = catalog.find(id) else {
        if ctx.output.is_json() {
            ctx.output.json(&ProductOutput {
                product: None,
                cart: CartSummary::of(cart),
            });
        } else {
            ctx.output.info("Product not found");
        }
        return None;
    };

    let event = if add_to_cart {
        Some(cart.add_item(product))
    } else {
        None
    };

    if ctx.output.is_json() {
        ctx.output.json(&ProductOutput {
            product: Some(product),
            cart: CartSummary::of(cart),
        });
        return event;
    }

    let currency = ctx.config.display.currency;
    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Price", &product.price.display(currency));
    if let Some(brand) = product.brand() {
        ctx.output.kv("Brand", brand);
    }
    if let Some(model) = product.model() {
        ctx.output.kv("Model", model);
    }
    ctx.output
        .kv("Created", &product.created_at.format("%Y-%m-%d %H:%M UTC").to_string());
    if !product.image.is_empty() {
        ctx.output.kv("Image", &product.image);
    }
    if !product.description.is_empty() {
        println!();
        println!("  {}", product.description);
    }

    if let Some(message) = event.as_ref().and_then(|e| e.notification()) {
        println!();
        ctx.output.success(&message);
    }

    println!();
    print_cart_totals(&cart.totals(), currency, ctx);

    event
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::output::Output;
    use storefront_cache::MemoryStore;

    fn context() -> Context {
        Context {
            config: StorefrontConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: std::env::temp_dir(),
        }
    }

    fn catalog() -> CatalogStore {
        let products: Vec<Product> = serde_json::from_str(
            r#"[{"id":"1","name":"Apple iPhone13","price":"100","createdAt":"2024-01-01T12:00:00Z"}]"#,
        )
        .unwrap();
        CatalogStore::loaded(products)
    }

    #[test]
    fn test_unknown_id_is_not_found_and_leaves_cart() {
        let mut cart = CartStore::new(MemoryStore::new());

        let event = show(&catalog(), &ProductId::new("99"), true, &mut cart, &context());

        assert!(event.is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_to_cart_from_detail_view() {
        let mut cart = CartStore::new(MemoryStore::new());

        let event = show(&catalog(), &ProductId::new("1"), true, &mut cart, &context());

        assert_eq!(
            event.and_then(|e| e.notification()).as_deref(),
            Some("Apple iPhone13 added to cart!")
        );
        assert_eq!(cart.totals().item_count, 1);
    }

    #[test]
    fn test_show_without_add_leaves_cart() {
        let mut cart = CartStore::new(MemoryStore::new());

        let event = show(&catalog(), &ProductId::new("1"), false, &mut cart, &context());

        assert!(event.is_none());
        assert!(cart.is_empty());
    }
}
