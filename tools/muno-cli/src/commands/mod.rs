//! CLI command implementations.

pub mod browse;
pub mod checkout;
pub mod config;
pub mod finder;

use clap::{Args, Subcommand};

/// Arguments for the browse command.
#[derive(Args, Default)]
pub struct BrowseArgs {
    /// Raw listing query string (e.g. "type=daily-journals&sort=newest").
    #[arg(short, long)]
    pub query: Option<String>,

    /// Journal type slug (repeatable).
    #[arg(long = "type", value_name = "SLUG")]
    pub types: Vec<String>,

    /// Audience or recipient slug (repeatable).
    #[arg(long = "for", value_name = "SLUG")]
    pub audiences: Vec<String>,

    /// Feature slug (repeatable).
    #[arg(long = "feature", value_name = "SLUG")]
    pub features: Vec<String>,

    /// Accessory category slug (repeatable).
    #[arg(long = "accessory", value_name = "SLUG")]
    pub accessories: Vec<String>,

    /// Occasion slug or free text (repeatable).
    #[arg(long = "occasion", value_name = "TEXT")]
    pub occasions: Vec<String>,

    /// Minimum price.
    #[arg(long)]
    pub min: Option<u64>,

    /// Maximum price.
    #[arg(long)]
    pub max: Option<u64>,

    /// Sort order: featured, price-low-high, price-high-low, newest.
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Layout: grid or list.
    #[arg(long, default_value = "grid")]
    pub view: String,
}

/// Arguments for the finder command.
#[derive(Args)]
pub struct FinderArgs {
    #[command(subcommand)]
    pub kind: FinderKind,
}

/// Which finder to run.
#[derive(Subcommand)]
pub enum FinderKind {
    /// Gift finder: occasion, recipient, gift types, budget.
    Gift(FinderRunArgs),

    /// Journal finder: journal type, audience, features.
    Journal(FinderRunArgs),
}

/// Options shared by both finders.
#[derive(Args)]
pub struct FinderRunArgs {
    /// Answer file (TOML or JSON) instead of interactive prompts.
    #[arg(short, long)]
    pub answers: Option<String>,

    /// Print the listing query without opening the listing.
    #[arg(long)]
    pub no_browse: bool,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Checkout form file (TOML or JSON) instead of interactive prompts.
    #[arg(short, long)]
    pub form: Option<String>,

    /// Promo code to apply.
    #[arg(short, long)]
    pub promo: Option<String>,

    /// Catalog product ID to buy instead of the demo cart (repeatable).
    #[arg(long = "add", value_name = "PRODUCT_ID")]
    pub products: Vec<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,

    /// Initialize a new config file.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
