//! CLI configuration.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use muno_commerce::catalog::CatalogGenerator;
use muno_commerce::checkout::SUBMIT_LATENCY;
use muno_commerce::search::ListingConfig;
use muno_commerce::Currency;
use muno_observability::{LogFormat, LogLevel};
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MunoConfig {
    /// Mock catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Simulated network latency.
    #[serde(default)]
    pub latency: LatencyConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MunoConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Catalog size and listing latency.
    pub fn listing_config(&self) -> ListingConfig {
        ListingConfig {
            catalog_size: self.catalog.size,
            latency: Duration::from_millis(self.latency.listing_ms),
        }
    }

    /// Generator configured with the seed and currency.
    pub fn generator(&self) -> Result<CatalogGenerator> {
        let currency = Currency::from_code(&self.catalog.currency)
            .ok_or_else(|| anyhow!("Unknown currency: {}", self.catalog.currency))?;
        let mut generator = CatalogGenerator::new().with_currency(currency);
        if let Some(seed) = self.catalog.seed {
            generator = generator.with_seed(seed);
        }
        Ok(generator)
    }

    pub fn checkout_latency(&self) -> Duration {
        Duration::from_millis(self.latency.checkout_ms)
    }
}

/// Mock catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Number of products to generate (default: 24).
    #[serde(default = "default_catalog_size")]
    pub size: usize,

    /// Fixed seed for a reproducible catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// ISO currency code (default: UGX).
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_catalog_size() -> usize {
    ListingConfig::default().catalog_size
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            size: default_catalog_size(),
            seed: None,
            currency: default_currency(),
        }
    }
}

/// Simulated latency in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyConfig {
    #[serde(default = "default_listing_ms")]
    pub listing_ms: u64,

    #[serde(default = "default_checkout_ms")]
    pub checkout_ms: u64,
}

fn default_listing_ms() -> u64 {
    ListingConfig::default().latency.as_millis() as u64
}

fn default_checkout_ms() -> u64 {
    SUBMIT_LATENCY.as_millis() as u64
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            listing_ms: default_listing_ms(),
            checkout_ms: default_checkout_ms(),
        }
    }
}

/// Log output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,
}

/// Generate a default muno.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Muno storefront configuration

[catalog]
size = {size}
# seed = 42
currency = "{currency}"

[latency]
listing_ms = {listing_ms}
checkout_ms = {checkout_ms}

[logging]
level = "info"
format = "human"
"#,
        size = default_catalog_size(),
        currency = default_currency(),
        listing_ms = default_listing_ms(),
        checkout_ms = default_checkout_ms(),
    )
}
