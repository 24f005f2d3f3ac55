//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, StorefrontConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force, as_json } => init_config(force, as_json, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    let config = &ctx.config;

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("endpoint", &config.catalog.endpoint);
    ctx.output
        .kv("connect_timeout_ms", &config.catalog.connect_timeout_ms.to_string());
    ctx.output.kv("timeout_ms", &config.catalog.timeout_ms.to_string());

    ctx.output.info("");
    ctx.output.info("[cart]");
    match ctx.storage_dir() {
        Ok(dir) => ctx.output.kv("storage_dir", &dir.display().to_string()),
        Err(e) => ctx.output.kv("storage_dir", &format!("unavailable ({})", e)),
    }
    ctx.output.kv("storage_key", &config.cart.storage_key);

    ctx.output.info("");
    ctx.output.info("[display]");
    ctx.output.kv(
        "currency",
        &format!(
            "{} ({})",
            config.display.currency.code(),
            config.display.currency.symbol()
        ),
    );

    Ok(())
}

fn init_config(force: bool, as_json: bool, ctx: &Context) -> Result<()> {
    let name = if as_json {
        CONFIG_FILE_NAMES[2]
    } else {
        CONFIG_FILE_NAMES[0]
    };
    let config_path = ctx.cwd.join(name);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if as_json {
        StorefrontConfig::default().save(&config_path)?;
    } else {
        fs::write(&config_path, generate_default_config())?;
    }

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = ctx.config.validate();

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
