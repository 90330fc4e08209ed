//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Path => config_path(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("[catalog]");
    if let Some(ref url) = ctx.config.catalog.base_url {
        ctx.output.kv("base_url", url);
    }
    if let Some(ref file) = ctx.config.catalog.db_file {
        ctx.output.kv("db_file", file);
    }
    ctx.output
        .kv("timeout_ms", &ctx.config.catalog.timeout_ms.to_string());

    ctx.output.info("[store]");
    ctx.output.kv("dir", &ctx.config.store.dir);
    ctx.output.kv("key", &ctx.cart_key());

    ctx.output.info("[messages]");
    let messages = &ctx.config.messages;
    for (name, text) in [
        ("out_of_stock", &messages.out_of_stock),
        ("add_failed", &messages.add_failed),
        ("remove_failed", &messages.remove_failed),
        ("update_failed", &messages.update_failed),
        ("clear_failed", &messages.clear_failed),
    ] {
        ctx.output.kv(name, text);
    }

    Ok(())
}

async fn config_path(ctx: &Context) -> Result<()> {
    match &ctx.config_path {
        Some(path) if ctx.output.is_json() => {
            ctx.output.json(&serde_json::json!({ "path": path }));
        }
        Some(path) => println!("{}", path.display()),
        None => bail!(
            "No config file found (looked for {}). Run `cart config init` to create one.",
            CONFIG_NAMES.join(", ")
        ),
    }
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

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (mut errors, warnings) = ctx.config.problems();

    if let Some(file) = &ctx.config.catalog.db_file {
        if ctx.config.catalog.base_url.is_none() && !ctx.resolve_path(file).exists() {
            errors.push(format!("catalog.db_file '{}' does not exist", file));
        }
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
