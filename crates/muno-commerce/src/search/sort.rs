//! Sort options for the product listing.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order, untouched.
    #[default]
    Featured,
    /// Price, low to high.
    PriceLowHigh,
    /// Price, high to low.
    PriceHighLow,
    /// Most recently added first.
    Newest,
}

impl SortOption {
    /// Every option, in dropdown order.
    pub const ALL: [SortOption; 4] = [
        SortOption::Featured,
        SortOption::PriceLowHigh,
        SortOption::PriceHighLow,
        SortOption::Newest,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::PriceLowHigh => "price-low-high",
            SortOption::PriceHighLow => "price-high-low",
            SortOption::Newest => "newest",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceLowHigh => "Price: Low to High",
            SortOption::PriceHighLow => "Price: High to Low",
            SortOption::Newest => "Newest",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.slug() == slug.trim())
    }

    /// Ordering of two products under this option. `Featured` treats all as equal.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Featured => Ordering::Equal,
            SortOption::PriceLowHigh => a.price.cmp(&b.price),
            SortOption::PriceHighLow => b.price.cmp(&a.price),
            SortOption::Newest => {
                // Ids without a numeric suffix go last.
                match (a.id.sequence_number(), b.id.sequence_number()) {
                    (Some(x), Some(y)) => y.cmp(&x),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Products reordered by `option`. Ties keep their input order.
pub fn sort(products: &[Product], option: SortOption) -> Vec<Product> {
    let mut sorted = products.to_vec();
    if option != SortOption::Featured {
        sorted.sort_by(|a, b| option.compare(a, b));
    }
    sorted
}
