//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    let catalog = &ctx.config.catalog;
    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("size", &catalog.size.to_string());
    match catalog.seed {
        Some(seed) => ctx.output.kv("seed", &seed.to_string()),
        None => ctx.output.kv("seed", "random"),
    }
    ctx.output.kv("currency", &catalog.currency);

    ctx.output.info("");
    ctx.output.info("[latency]");
    ctx.output
        .kv("listing_ms", &ctx.config.latency.listing_ms.to_string());
    ctx.output
        .kv("checkout_ms", &ctx.config.latency.checkout_ms.to_string());

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", ctx.config.logging.level.as_str());
    ctx.output.kv("format", ctx.config.logging.format.as_str());

    ctx.output.info("");
    ctx.output.kv("session", ctx.logger.session_id().as_str());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.logger
        .info_builder("Config file written")
        .field("path", config_path.display().to_string())
        .emit();
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
