//! Product records.

use crate::catalog::{Category, Feature, Occasion, Recipient};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Price in whole currency units.
    pub price: u64,
    /// Currency of `price`.
    #[serde(default)]
    pub currency: Currency,
    /// Category (journal type or accessory line).
    pub category: Category,
    /// Image path.
    #[serde(default)]
    pub image: Option<String>,
    /// Long description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the product can be ordered.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Occasions the product suits.
    #[serde(default)]
    pub occasions: BTreeSet<Occasion>,
    /// Who the product is for.
    #[serde(default)]
    pub recipients: BTreeSet<Recipient>,
    /// Feature tags.
    #[serde(default)]
    pub features: BTreeSet<Feature>,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Create an in-stock product with no tags.
    pub fn new(id: ProductId, name: impl Into<String>, price: u64, category: Category) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            currency: Currency::default(),
            category,
            image: None,
            description: None,
            in_stock: true,
            occasions: BTreeSet::new(),
            recipients: BTreeSet::new(),
            features: BTreeSet::new(),
        }
    }

    /// Price as a [`Money`] value.
    pub fn money(&self) -> Money {
        Money::from_units(self.price, self.currency)
    }

    /// Add an occasion tag.
    pub fn with_occasion(mut self, occasion: Occasion) -> Self {
        self.occasions.insert(occasion);
        self
    }

    /// Add a recipient tag.
    pub fn with_recipient(mut self, recipient: Recipient) -> Self {
        self.recipients.insert(recipient);
        self
    }

    /// Add a feature tag.
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.insert(feature);
        self
    }

    /// Mark the product out of stock.
    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }
}
