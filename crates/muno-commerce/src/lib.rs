//! Storefront domain types and logic for the Muno Journey shop.
//!
//! This crate provides the state behind every storefront screen:
//!
//! - **Catalog**: Products, the journal/gift taxonomy, mock catalog generation
//! - **Search**: Filter state, sort options, the listing query contract, the product list view
//! - **Finder**: Gift finder and journal finder wizards
//! - **Checkout**: Checkout form validation, order summary, simulated submission
//!
//! Every component is an explicit state object driven by a single update
//! function. Simulated network latency goes through the [`Delay`] trait so it
//! can be skipped in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use muno_commerce::prelude::*;
//!
//! // Run the gift finder
//! let mut finder = GiftFinder::default();
//! finder.update(FinderAction::Answer(GiftAnswer::Occasion(OccasionSelection::Preset(Occasion::Birthday))))?;
//! finder.update(FinderAction::Next)?;
//! // ...
//! let Transition::Submitted(query) = finder.update(FinderAction::Next)? else { unreachable!() };
//!
//! // Seed the product listing from the emitted query
//! let view = ProductListView::mount(&query, &CatalogGenerator::new(), &ListingConfig::default(), &InstantDelay).await;
//! println!("{}", view.summary());
//! ```

pub mod error;
pub mod ids;
pub mod latency;
pub mod money;

pub mod catalog;
pub mod checkout;
pub mod finder;
pub mod search;

pub use error::{CheckoutError, CommerceError, FinderError, UnknownSlug};
pub use ids::*;
pub use latency::{Delay, InstantDelay, RecordingDelay};
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CheckoutError, CommerceError, FinderError, UnknownSlug};
    pub use crate::ids::*;
    pub use crate::latency::{Delay, InstantDelay, RecordingDelay};
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        CatalogGenerator, Category, Feature, GiftType, Occasion, Product, Recipient,
    };

    // Search
    pub use crate::search::{
        apply, sort, FilterDimension, FilterState, FilterToggle, ListingAction, ListingConfig,
        ListingQuery, PriceRange, ProductListView, SortOption, ViewMode,
    };

    // Finder
    pub use crate::finder::{
        Finder, FinderAction, FinderFlow, FinderStatus, GiftAnswer, GiftAnswers, GiftFinder,
        JournalAnswer, JournalAnswers, JournalFinder, OccasionSelection, StepMarker, Transition,
    };

    // Checkout
    pub use crate::checkout::{
        submit, CheckoutForm, DeliveryMethod, FieldError, FormField, LineItem, OrderConfirmation,
        OrderSummary, PickupLocation, PricingBreakdown,
    };
}
