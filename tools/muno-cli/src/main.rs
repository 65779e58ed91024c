//! Muno CLI - the Muno Journey storefront in the terminal.
//!
//! Commands:
//! - `muno browse` - Filter and sort the product listing
//! - `muno finder gift|journal` - Run a guided finder and open its results
//! - `muno checkout` - Fill in the checkout form and place a simulated order
//! - `muno config` - Manage configuration

mod commands;
mod config;
mod context;
mod delay;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use muno_observability::{init_tracing, LogLevel};

use commands::{BrowseArgs, CheckoutArgs, ConfigArgs, FinderArgs};

/// Muno CLI - Browse journals, find gifts, and check out
#[derive(Parser)]
#[command(name = "muno")]
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
    /// Browse the product listing
    Browse(BrowseArgs),

    /// Run the gift or journal finder
    Finder(FinderArgs),

    /// Check out the cart
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let level = if ctx.output.is_verbose() {
        LogLevel::Debug
    } else {
        ctx.config.logging.level
    };
    if let Err(e) = init_tracing(level, ctx.config.logging.format) {
        ctx.output.warn(&e.to_string());
    }
    tracing::debug!(session = %ctx.logger.session_id(), "Session started");

    // Execute command
    let result = match cli.command {
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Finder(args) => commands::finder::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.logger
            .error_builder("Command failed")
            .field("error", format!("{:#}", e))
            .emit();
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
