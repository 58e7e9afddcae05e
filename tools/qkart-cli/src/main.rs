//! QKart CLI - Terminal storefront for the QKart shop.
//!
//! Commands:
//! - `qkart login` / `qkart register` / `qkart logout` / `qkart whoami`
//! - `qkart products` - List or search products
//! - `qkart browse` - Interactive search with debounced input
//! - `qkart cart` - Show and edit the cart
//! - `qkart address` - Manage shipping addresses
//! - `qkart checkout` - Place an order
//! - `qkart config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    AddressArgs, CartArgs, CheckoutArgs, ConfigArgs, LoginArgs, ProductsArgs, RegisterArgs,
};

/// QKart CLI - Shop the QKart storefront from a terminal
#[derive(Parser)]
#[command(name = "qkart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and save the session
    Login(LoginArgs),

    /// Create an account
    Register(RegisterArgs),

    /// Forget the saved session
    Logout,

    /// Show the logged-in user and wallet balance
    Whoami,

    /// List or search products
    Products(ProductsArgs),

    /// Search interactively, one query per line
    Browse,

    /// Show and edit the cart
    Cart(CartArgs),

    /// Manage shipping addresses
    Address(AddressArgs),

    /// Place an order for the cart
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Login(args) => commands::auth::login(args, &ctx).await,
        Commands::Register(args) => commands::auth::register(args, &ctx).await,
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Browse => commands::browse::run(&ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Address(args) => commands::address::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins; otherwise `--verbose` enables debug.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "qkart_cli=debug,qkart_storefront=debug,qkart_data=debug,qkart_auth=debug,qkart_commerce=debug,warn"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
