//! Cart commands.

use anyhow::Result;
use storefront_core::cart::CartEvent;
use storefront_core::{ProductId, StorefrontError};

use super::{print_cart, CartArgs, CartCommand, CartSummary};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    let event = match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => None,
        CartCommand::Add { id } => {
            let id = ProductId::new(id);
            let catalog = ctx.fetch_catalog(None).await?;
            let product = catalog
                .find(&id)
                .ok_or_else(|| StorefrontError::ProductNotFound(id.to_string()))?;
            Some(cart.add_item(product))
        }
        CartCommand::Remove { id } => Some(cart.remove_item(&ProductId::new(id))),
        CartCommand::Set { id, quantity } => Some(cart.set_quantity(&ProductId::new(id), quantity)),
    };

    if ctx.output.is_json() {
        ctx.output.json(&CartSummary::of(&cart));
        return Ok(());
    }

    if let Some(event) = event {
        report(&event, ctx);
    }
    print_cart(&cart, ctx.config.display.currency, ctx);

    Ok(())
}

fn report(event: &CartEvent, ctx: &Context) {
    match event {
        CartEvent::QuantityChanged { name, quantity } => {
            ctx.output
                .success(&format!("{} quantity set to {}", name, quantity));
        }
        CartEvent::Unchanged => ctx.output.info("That product is not in your cart."),
        _ => {
            if let Some(message) = event.notification() {
                ctx.output.success(&message);
            }
        }
    }
}
