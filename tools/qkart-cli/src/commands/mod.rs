//! CLI command implementations.

pub mod address;
pub mod auth;
pub mod browse;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod products;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use qkart_commerce::prelude::*;

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Username (prompted when omitted).
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password (prompted when omitted).
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    /// Username (prompted when omitted).
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password. Skips both password prompts when given.
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Search by name or category.
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart contents and totals.
    Show,
    /// Add one unit of a product.
    Add {
        /// Product id or name.
        product: String,
    },
    /// Set the quantity of a product (0 removes it).
    Set {
        /// Product id or name.
        product: String,
        /// New quantity.
        qty: u32,
    },
    /// Remove a product.
    Remove {
        /// Product id or name.
        product: String,
    },
}

/// Arguments for the address command.
#[derive(Args)]
pub struct AddressArgs {
    #[command(subcommand)]
    pub command: Option<AddressCommand>,
}

#[derive(Subcommand)]
pub enum AddressCommand {
    /// List saved addresses.
    List,
    /// Save a new address.
    Add {
        /// Address text (20 to 128 characters).
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete a saved address.
    Delete {
        /// Address id.
        id: String,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Address id to ship to (prompted when omitted).
    #[arg(short, long)]
    pub address: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
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
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Print the config and session file paths.
    Path,
    /// Validate the config file.
    Validate,
}

/// Find a product by exact id, else by a unique case-insensitive name match.
pub fn resolve_product<'a>(products: &'a [Product], query: &str) -> Result<&'a Product> {
    if let Some(product) = products.iter().find(|p| p.id.as_str() == query) {
        return Ok(product);
    }

    let needle = query.to_lowercase();
    let matches: Vec<&Product> = products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect();

    match matches.as_slice() {
        [] => bail!("No product matches '{}'", query),
        [product] => Ok(product),
        many => {
            let names: Vec<&str> = many.iter().map(|p| p.name.as_str()).collect();
            bail!("'{}' matches several products: {}", query, names.join(", "))
        }
    }
}
