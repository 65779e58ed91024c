//! Mock catalog generation.
//!
//! There is no product backend; every session browses a freshly generated
//! catalog. A seed makes the catalog reproducible.

use crate::catalog::{Category, Feature, Occasion, Product, Recipient};
use crate::ids::ProductId;
use crate::money::Currency;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Lowest generated price.
pub const PRICE_FLOOR: u64 = 25_000;
/// Width of the generated price band; prices fall in `[PRICE_FLOOR, PRICE_FLOOR + PRICE_SPREAD)`.
pub const PRICE_SPREAD: u64 = 150_000;
/// Number of placeholder images cycled through.
pub const PLACEHOLDER_IMAGES: usize = 8;
/// Chance of a generated product being in stock.
pub const IN_STOCK_PROBABILITY: f64 = 0.8;

const JOURNAL_DESCRIPTION: &str = "This beautiful prayer journal features guided prompts, \
scripture references, and space for reflection. Perfect for establishing a consistent prayer practice.";
const ACCESSORY_DESCRIPTION: &str =
    "A thoughtful companion for your journal, made to pair with any of our prayer journals.";

/// Builds mock product catalogs.
#[derive(Debug, Clone, Default)]
pub struct CatalogGenerator {
    seed: Option<u64>,
    currency: Currency,
}

impl CatalogGenerator {
    /// Unseeded generator pricing in the default currency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reproducible generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Price products in `currency`.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Configured seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Generate `count` products with ids `product-1..=product-count`.
    pub fn generate(&self, count: usize) -> Vec<Product> {
        let products = match self.seed {
            Some(seed) => self.generate_with(&mut StdRng::seed_from_u64(seed), count),
            None => self.generate_with(&mut rand::thread_rng(), count),
        };
        debug!(count, seed = ?self.seed, "Generated mock catalog");
        products
    }

    /// Generate `count` products drawing from `rng`.
    pub fn generate_with<R: Rng>(&self, rng: &mut R, count: usize) -> Vec<Product> {
        (0..count).map(|i| self.product(rng, i)).collect()
    }

    fn product<R: Rng>(&self, rng: &mut R, index: usize) -> Product {
        let n = index + 1;
        let category = *Category::ALL
            .choose(rng)
            .unwrap_or(&Category::DailyJournals);

        let (name, description) = if category.is_accessory() {
            (format!("{} {}", category.label(), n), ACCESSORY_DESCRIPTION)
        } else {
            (format!("Prayer Journal {}", n), JOURNAL_DESCRIPTION)
        };

        let price = PRICE_FLOOR + rng.gen_range(0..PRICE_SPREAD);

        let mut product = Product::new(ProductId::sequence(n), name, price, category);
        product.currency = self.currency;
        product.image = Some(format!("/products/product-{}.jpg", (index % PLACEHOLDER_IMAGES) + 1));
        product.description = Some(description.to_string());
        product.in_stock = rng.gen_bool(IN_STOCK_PROBABILITY);

        // Two independent draws; duplicates collapse in the set.
        for _ in 0..2 {
            if let Some(feature) = Feature::ALL.choose(rng) {
                product.features.insert(*feature);
            }
        }

        let recipient_count = rng.gen_range(1..=2);
        product
            .recipients
            .extend(Recipient::ALL.choose_multiple(rng, recipient_count).copied());

        let presets = Occasion::presets();
        let occasion_count = rng.gen_range(1..=2);
        product
            .occasions
            .extend(presets.choose_multiple(rng, occasion_count).cloned());

        product
    }
}

/// Generate `count` products from the thread RNG.
pub fn generate(count: usize) -> Vec<Product> {
    CatalogGenerator::new().generate(count)
}
