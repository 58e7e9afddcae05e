//! Cart commands.

use anyhow::{bail, Result};
use qkart_auth::Session;
use qkart_commerce::prelude::*;
use qkart_storefront::{AddOutcome, CatalogPage};

use super::{resolve_product, CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let session = ctx.require_session()?;
    let mut page = CatalogPage::new(ctx.api(), ctx.notifier());

    let spinner = ctx.output.spinner("Loading cart...");
    page.open(Some(&session)).await;
    spinner.finish_and_clear();

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { product } => {
            let product_id = lookup(&page, &product)?;
            match page.add_to_cart(Some(&session), &product_id).await {
                AddOutcome::Added => {
                    ctx.output.success(&format!("Added {} to cart", product_id))
                }
                AddOutcome::AlreadyInCart => {
                    ctx.output
                        .info("Use `qkart cart set` to change the quantity");
                }
                AddOutcome::LoginRequired => bail!("Not logged in"),
                AddOutcome::Failed(e) => return Err(e.into()),
            }
        }
        CartCommand::Set { product, qty } => {
            set_quantity(&mut page, &session, &product, qty).await?;
        }
        CartCommand::Remove { product } => {
            set_quantity(&mut page, &session, &product, 0).await?;
        }
    }

    show_cart(ctx, &page);
    Ok(())
}

async fn set_quantity(
    page: &mut CatalogPage,
    session: &Session,
    product: &str,
    qty: u32,
) -> Result<()> {
    let product_id = lookup(page, product)?;
    page.cart_mut()
        .set_quantity(session, &product_id, qty)
        .await?;
    Ok(())
}

fn lookup(page: &CatalogPage, query: &str) -> Result<ProductId> {
    let products = page.products();
    Ok(resolve_product(&products, query)?.id.clone())
}

/// Print cart lines with the count and value totals.
pub fn show_cart(ctx: &Context, page: &CatalogPage) {
    let items = page.cart_items();
    let totals = CartTotals::of(&items);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": items,
            "count": totals.count,
            "value": totals.value.to_decimal(),
        }));
        return;
    }

    ctx.output.header("Cart");
    print_items(ctx, &items);
    if !items.is_empty() {
        ctx.output.kv("Items", &totals.count.to_string());
        ctx.output.kv("Total", &ctx.output.money(&totals.value));
    }
}

/// Print line items as a table.
pub fn print_items(ctx: &Context, items: &[CartLineItem]) {
    if items.is_empty() {
        ctx.output.info("Cart is empty");
        return;
    }

    let widths = [18, 36, 5, 10, 10];
    ctx.output
        .table_row(&["ID", "NAME", "QTY", "PRICE", "SUBTOTAL"], &widths);
    for item in items {
        ctx.output.table_row(
            &[
                item.product_id.as_str(),
                &item.name,
                &item.qty.to_string(),
                &ctx.output.money(&item.cost),
                &ctx.output.money(&item.subtotal()),
            ],
            &widths,
        );
    }
}
