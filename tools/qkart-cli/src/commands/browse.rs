//! Interactive product search.
//!
//! Each line read from stdin is one search input. Inputs arriving within
//! the debounce window replace each other, so only the last one is sent.

use anyhow::{Context as _, Result};
use qkart_storefront::{AddOutcome, CatalogPage, SEARCH_DEBOUNCE};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::products::print_products;
use super::resolve_product;
use crate::context::Context;

/// Run the browse command.
pub async fn run(ctx: &Context) -> Result<()> {
    let session = ctx.session()?;
    let mut page = CatalogPage::new(ctx.api(), ctx.notifier());

    let spinner = ctx.output.spinner("Loading products...");
    page.open(session.as_ref()).await;
    spinner.finish_and_clear();

    show(ctx, &page);
    ctx.output.info(&format!(
        "Type to search ({}ms debounce). `:add <product>` adds to cart, `:q` quits.",
        SEARCH_DEBOUNCE.as_millis()
    ));

    let mut search = page.search_box();
    let mut updates = page.feed().subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                let line = line.trim();
                if line == ":q" {
                    break;
                }
                if let Some(query) = line.strip_prefix(":add ") {
                    let products = page.products();
                    let product_id = match resolve_product(&products, query.trim()) {
                        Ok(product) => product.id.clone(),
                        Err(e) => {
                            ctx.output.warn(&e.to_string());
                            continue;
                        }
                    };
                    if page.add_to_cart(session.as_ref(), &product_id).await == AddOutcome::Added {
                        ctx.output.success(&format!("Added {} to cart", product_id));
                    }
                    continue;
                }
                search.input(line);
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                show(ctx, &page);
            }
        }
    }

    Ok(())
}

fn show(ctx: &Context, page: &CatalogPage) {
    let products = page.products();
    if ctx.output.is_json() {
        ctx.output.json(&products);
        return;
    }
    ctx.output.header(&format!("{} products", products.len()));
    print_products(ctx, &products, page.cart().records());
}
