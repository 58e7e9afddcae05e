//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, ENDPOINT_ENV};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Get { key } => get_config(&key, ctx).await,
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Path => show_paths(ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("[api]");
    ctx.output.kv("endpoint", &ctx.config.api.endpoint);
    if std::env::var_os(ENDPOINT_ENV).is_some() {
        ctx.output
            .kv("effective", &format!("{} (from {})", ctx.config.endpoint(), ENDPOINT_ENV));
    }

    ctx.output.info("[session]");
    ctx.output.kv("path", &ctx.session_file().display().to_string());

    ctx.output.info("[display]");
    ctx.output.kv("currency", &ctx.config.display.currency);
    ctx.output
        .kv("show_ratings", &ctx.config.display.show_ratings.to_string());

    Ok(())
}

async fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = ctx.config.get(key)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

async fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(config_path) = ctx.config_path.as_deref() else {
        bail!("No config file found. Run `qkart config init` to create one.");
    };
    let path = config_path.to_string_lossy();

    let mut config = CliConfig::load(&path)?;
    config.set(key, value)?;
    config.save(&path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn show_paths(ctx: &Context) -> Result<()> {
    let config = ctx
        .config_path
        .as_ref()
        .map(|p| p.display().to_string());
    let session = ctx.session_file().display().to_string();

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "config": config, "session": session }));
        return Ok(());
    }

    ctx.output
        .kv("config", config.as_deref().unwrap_or("(none, using defaults)"));
    ctx.output.kv("session", &session);
    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let errors = ctx.config.validate();
    if errors.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }
    bail!("Configuration has {} error(s)", errors.len())
}
