//! Order placement.

use anyhow::{bail, Result};
use dialoguer::{Confirm, Select};
use qkart_commerce::prelude::*;
use qkart_storefront::{CheckoutPage, OrderOutcome};

use super::cart::print_items;
use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.require_session()?;
    let mut page = CheckoutPage::new(ctx.api(), ctx.notifier());

    let spinner = ctx.output.spinner("Loading checkout...");
    page.open(Some(&session)).await;
    spinner.finish_and_clear();

    let totals = page.totals();
    if !ctx.output.is_json() {
        ctx.output.header("Order Summary");
        print_items(ctx, &page.items());
        ctx.output.kv("Items", &totals.count.to_string());
        ctx.output.kv("Total", &ctx.output.money(&totals.value));
        ctx.output.kv("Wallet", &ctx.output.money(&session.balance()));
    }

    match args.address {
        Some(id) => {
            let id = AddressId::from(id);
            if !page.select_address(&id) {
                bail!("No saved address with id {}", id);
            }
        }
        None if !page.addresses().is_empty() && !args.yes && !ctx.output.is_json() => {
            let addresses = page.addresses().all();
            let labels: Vec<&str> = addresses.iter().map(|a| a.text.as_str()).collect();
            let choice = Select::new()
                .with_prompt("Ship to")
                .items(&labels)
                .default(0)
                .interact()?;
            let id = addresses[choice].id.clone();
            page.select_address(&id);
        }
        None => {}
    }

    if let Some(address) = page.addresses().selected() {
        ctx.output.kv("Ship to", &address.text);
    }

    if !args.yes && !ctx.output.is_json() && page.addresses().selected().is_some() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt("Place order?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let store = ctx.store();
    let spinner = ctx.output.spinner("Placing order...");
    let outcome = page.checkout(&mut session, store.as_ref()).await;
    spinner.finish_and_clear();

    match outcome {
        OrderOutcome::Placed { charged } => {
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({
                    "charged": charged.to_decimal(),
                    "balance": session.balance().to_decimal(),
                }));
            } else {
                ctx.output.kv("Charged", &ctx.output.money(&charged));
                ctx.output.kv("Wallet", &ctx.output.money(&session.balance()));
            }
            Ok(())
        }
        OrderOutcome::Rejected(_) => bail!("Order not placed"),
        OrderOutcome::AlreadyPlacing => bail!("An order is already being placed"),
        OrderOutcome::Failed(e) => Err(e.into()),
    }
}
