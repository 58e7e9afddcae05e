//! Address book commands.

use anyhow::{bail, Result};
use qkart_commerce::prelude::*;
use qkart_storefront::CheckoutPage;

use super::{AddressArgs, AddressCommand};
use crate::context::Context;

/// Run the address command.
pub async fn run(args: AddressArgs, ctx: &Context) -> Result<()> {
    let session = ctx.require_session()?;
    let mut page = CheckoutPage::new(ctx.api(), ctx.notifier());

    let spinner = ctx.output.spinner("Loading addresses...");
    page.open(Some(&session)).await;
    spinner.finish_and_clear();

    match args.command.unwrap_or(AddressCommand::List) {
        AddressCommand::List => {}
        AddressCommand::Add { text } => {
            if !page.add_address(&session, &text.join(" ")).await {
                bail!("Address was not saved");
            }
        }
        AddressCommand::Delete { id } => {
            let id = AddressId::from(id);
            if !page.delete_address(&session, &id).await {
                bail!("Address {} was not deleted", id);
            }
            ctx.output.success(&format!("Deleted address {}", id));
        }
    }

    print_addresses(ctx, page.addresses());
    Ok(())
}

/// Print the address book, marking the selected entry.
pub fn print_addresses(ctx: &Context, book: &AddressBook) {
    if ctx.output.is_json() {
        ctx.output.json(&book.all());
        return;
    }

    ctx.output.header("Addresses");
    if book.is_empty() {
        ctx.output.info("No addresses found. Add one with `qkart address add`.");
        return;
    }
    for address in book.all() {
        let marker = if book.is_selected(&address.id) { "*" } else { " " };
        ctx.output
            .list_item(&format!("{} {}  {}", marker, address.id, address.text));
    }
}
