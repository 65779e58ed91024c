//! Filter state and the product predicate set.
//!
//! A product passes a [`FilterState`] when its price lies inside the price
//! range and, for every tag dimension with a non-empty selection, it carries
//! at least one selected value. Values within a dimension are OR'd; dimensions
//! are AND'd. An empty selection places no constraint on its dimension.

use crate::catalog::{Category, Feature, Occasion, Product, Recipient};
use crate::CommerceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// Inclusive price interval with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u64, u64)", into = "(u64, u64)")]
pub struct PriceRange {
    min: u64,
    max: u64,
}

impl PriceRange {
    /// Upper bound of the listing's price slider.
    pub const DEFAULT_MAX: u64 = 200_000;
    /// Slider step.
    pub const STEP: u64 = 5_000;

    /// Create a range, rejecting `min > max`.
    pub fn new(min: u64, max: u64) -> Result<Self, CommerceError> {
        if min > max {
            return Err(CommerceError::InvalidPriceRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// `[0, max]`.
    pub fn up_to(max: u64) -> Self {
        Self { min: 0, max }
    }

    /// Lower bound.
    pub fn min(&self) -> u64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Whether `price` lies inside the range (both ends inclusive).
    pub fn contains(&self, price: u64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::up_to(Self::DEFAULT_MAX)
    }
}

impl TryFrom<(u64, u64)> for PriceRange {
    type Error = CommerceError;

    fn try_from((min, max): (u64, u64)) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}

impl From<PriceRange> for (u64, u64) {
    fn from(range: PriceRange) -> Self {
        (range.min, range.max)
    }
}

/// A tag dimension of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterDimension {
    Category,
    Recipient,
    Feature,
    Accessory,
    Occasion,
}

impl FilterDimension {
    /// Every dimension, in sidebar order.
    pub const ALL: [FilterDimension; 5] = [
        FilterDimension::Category,
        FilterDimension::Recipient,
        FilterDimension::Feature,
        FilterDimension::Accessory,
        FilterDimension::Occasion,
    ];

    /// Sidebar heading.
    pub fn label(&self) -> &'static str {
        match self {
            FilterDimension::Category => "Journal Type",
            FilterDimension::Recipient => "For Whom",
            FilterDimension::Feature => "Features",
            FilterDimension::Accessory => "Accessories",
            FilterDimension::Occasion => "Occasion",
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One value in one dimension, as flipped by a checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "dimension", content = "value", rename_all = "kebab-case")]
pub enum FilterToggle {
    Category(Category),
    Recipient(Recipient),
    Feature(Feature),
    Accessory(Category),
    Occasion(Occasion),
}

impl FilterToggle {
    /// Dimension this value belongs to.
    pub fn dimension(&self) -> FilterDimension {
        match self {
            FilterToggle::Category(_) => FilterDimension::Category,
            FilterToggle::Recipient(_) => FilterDimension::Recipient,
            FilterToggle::Feature(_) => FilterDimension::Feature,
            FilterToggle::Accessory(_) => FilterDimension::Accessory,
            FilterToggle::Occasion(_) => FilterDimension::Occasion,
        }
    }

    /// Chip label.
    pub fn label(&self) -> &str {
        match self {
            FilterToggle::Category(c) | FilterToggle::Accessory(c) => c.label(),
            FilterToggle::Recipient(r) => r.label(),
            FilterToggle::Feature(f) => f.label(),
            FilterToggle::Occasion(o) => o.label(),
        }
    }
}

/// Active constraints on the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Price interval.
    pub price: PriceRange,
    /// Journal types ("type").
    pub categories: BTreeSet<Category>,
    /// Recipients ("for whom").
    pub recipients: BTreeSet<Recipient>,
    /// Feature tags.
    pub features: BTreeSet<Feature>,
    /// Accessory lines, matched against the product category.
    pub accessories: BTreeSet<Category>,
    /// Occasions.
    pub occasions: BTreeSet<Occasion>,
}

impl FilterState {
    /// Unconstrained filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the value if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, toggle: FilterToggle) -> bool {
        let selected = match toggle.clone() {
            FilterToggle::Category(c) => flip(&mut self.categories, c),
            FilterToggle::Recipient(r) => flip(&mut self.recipients, r),
            FilterToggle::Feature(f) => flip(&mut self.features, f),
            FilterToggle::Accessory(c) => flip(&mut self.accessories, c),
            FilterToggle::Occasion(o) => flip(&mut self.occasions, o),
        };
        debug!(?toggle, selected, "Toggled filter");
        selected
    }

    /// Whether the value is selected.
    pub fn is_selected(&self, toggle: &FilterToggle) -> bool {
        match toggle {
            FilterToggle::Category(c) => self.categories.contains(c),
            FilterToggle::Recipient(r) => self.recipients.contains(r),
            FilterToggle::Feature(f) => self.features.contains(f),
            FilterToggle::Accessory(c) => self.accessories.contains(c),
            FilterToggle::Occasion(o) => self.occasions.contains(o),
        }
    }

    /// Replace the price interval.
    pub fn set_price_range(&mut self, min: u64, max: u64) -> Result<(), CommerceError> {
        self.price = PriceRange::new(min, max)?;
        Ok(())
    }

    /// Restore every dimension and the price range to defaults.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether nothing narrows the listing.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Number of constrained dimensions, counting a non-default price range as one.
    pub fn active_dimensions(&self) -> usize {
        let tags = FilterDimension::ALL
            .iter()
            .filter(|d| self.dimension_len(**d) > 0)
            .count();
        tags + usize::from(self.price != PriceRange::default())
    }

    /// Number of selected values in a dimension.
    pub fn dimension_len(&self, dimension: FilterDimension) -> usize {
        match dimension {
            FilterDimension::Category => self.categories.len(),
            FilterDimension::Recipient => self.recipients.len(),
            FilterDimension::Feature => self.features.len(),
            FilterDimension::Accessory => self.accessories.len(),
            FilterDimension::Occasion => self.occasions.len(),
        }
    }

    /// Every selected value, in sidebar order.
    pub fn selections(&self) -> Vec<FilterToggle> {
        let mut out = Vec::new();
        out.extend(self.categories.iter().copied().map(FilterToggle::Category));
        out.extend(self.recipients.iter().copied().map(FilterToggle::Recipient));
        out.extend(self.features.iter().copied().map(FilterToggle::Feature));
        out.extend(self.accessories.iter().copied().map(FilterToggle::Accessory));
        out.extend(self.occasions.iter().cloned().map(FilterToggle::Occasion));
        out
    }

    /// Labels of the active filter chips.
    pub fn selected_labels(&self) -> Vec<String> {
        self.selections()
            .iter()
            .map(|t| t.label().to_string())
            .collect()
    }

    /// Whether `product` passes every constraint.
    pub fn matches(&self, product: &Product) -> bool {
        self.price.contains(product.price)
            && admits(&self.categories, &product.category)
            && admits(&self.accessories, &product.category)
            && overlaps(&self.recipients, &product.recipients)
            && overlaps(&self.features, &product.features)
            && overlaps(&self.occasions, &product.occasions)
    }
}

fn flip<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value);
        true
    }
}

fn admits<T: Ord>(selection: &BTreeSet<T>, value: &T) -> bool {
    selection.is_empty() || selection.contains(value)
}

fn overlaps<T: Ord>(selection: &BTreeSet<T>, tags: &BTreeSet<T>) -> bool {
    selection.is_empty() || !selection.is_disjoint(tags)
}

/// Products passing `filters`, in their original order.
pub fn apply(products: &[Product], filters: &FilterState) -> Vec<Product> {
    products
        .iter()
        .filter(|p| filters.matches(p))
        .cloned()
        .collect()
}
