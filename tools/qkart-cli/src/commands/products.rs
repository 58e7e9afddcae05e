//! Product listing.

use anyhow::Result;
use qkart_commerce::prelude::*;
use qkart_storefront::CatalogPage;

use super::ProductsArgs;
use crate::context::Context;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let session = ctx.session()?;
    let mut page = CatalogPage::new(ctx.api(), ctx.notifier());

    let spinner = ctx.output.spinner("Loading products...");
    page.open(session.as_ref()).await;
    if let Some(text) = args.search.as_deref() {
        page.search(text).await;
    }
    spinner.finish_and_clear();

    let products = page.products();
    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    match args.search.as_deref() {
        Some(text) => ctx.output.header(&format!("Products matching '{}'", text)),
        None => ctx.output.header("Products"),
    }
    print_products(ctx, &products, page.cart().records());
    Ok(())
}

/// Print a product table, marking quantities already in the cart.
pub fn print_products(ctx: &Context, products: &[Product], cart: &[CartRecord]) {
    if products.is_empty() {
        ctx.output.info("No products found");
        return;
    }

    let widths = [18, 36, 14, 10, 8];
    ctx.output
        .table_row(&["ID", "NAME", "CATEGORY", "PRICE", "RATING"], &widths);
    for product in products {
        let price = ctx.output.money(&product.cost);
        let rating = if ctx.config.display.show_ratings {
            product.rating.to_string()
        } else {
            String::new()
        };
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &product.category,
                &price,
                &rating,
            ],
            &widths,
        );
        if let Some(record) = CartRecord::find(cart, &product.id) {
            ctx.output.list_item(&format!("{} in cart", record.qty));
        }
    }
}
