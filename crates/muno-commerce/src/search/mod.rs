//! Search module.
//!
//! Contains the filter predicate set, sort options, the listing query
//! string, and the product list view that composes them.

mod filter;
mod listing;
mod query;
mod sort;

pub use filter::{apply, FilterDimension, FilterState, FilterToggle, PriceRange};
pub use listing::{ListingAction, ListingConfig, ListingPhase, ProductListView, ViewMode};
pub use query::{keys, ListingQuery};
pub use sort::{sort, SortOption};
