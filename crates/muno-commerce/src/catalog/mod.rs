//! Product catalog module.
//!
//! Contains product records, the shop taxonomy, and mock catalog generation.

mod generator;
mod product;
mod taxonomy;

pub use generator::{generate, CatalogGenerator, PRICE_FLOOR, PRICE_SPREAD};
pub use product::Product;
pub use taxonomy::{Category, Feature, GiftType, Occasion, Recipient};
pub use crate::error::UnknownSlug;
