//! The product list view.
//!
//! Composes the catalog through the filter and the sort to produce what the
//! listing shows. The view starts `Loading`, waits out the simulated fetch,
//! and is `Ready` from then on. Every change goes through [`ProductListView::update`].

use crate::catalog::{CatalogGenerator, Product};
use crate::latency::Delay;
use crate::search::{apply, sort, FilterState, FilterToggle, ListingQuery, SortOption};
use crate::CommerceError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Size of the mock catalog and how long it takes to "arrive".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingConfig {
    pub catalog_size: usize,
    pub latency: Duration,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            catalog_size: 24,
            latency: Duration::from_millis(800),
        }
    }
}

/// Whether the catalog has arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingPhase {
    Loading,
    Ready,
}

/// Grid or list layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.trim() {
            "grid" => Some(ViewMode::Grid),
            "list" => Some(ViewMode::List),
            _ => None,
        }
    }
}

/// User actions on the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingAction {
    /// Flip one filter value.
    Toggle(FilterToggle),
    /// Move the price slider.
    SetPriceRange { min: u64, max: u64 },
    /// Pick a sort order.
    SetSort(SortOption),
    /// Drop every filter and return to the featured order.
    ClearFilters,
    /// Switch layout.
    SetViewMode(ViewMode),
}

/// State behind the product listing screen.
#[derive(Debug, Clone)]
pub struct ProductListView {
    phase: ListingPhase,
    catalog: Vec<Product>,
    filters: FilterState,
    sort: SortOption,
    view_mode: ViewMode,
    visible: Vec<Product>,
}

impl ProductListView {
    /// A loading view with the given filters and sort.
    pub fn new(filters: FilterState, sort: SortOption) -> Self {
        Self {
            phase: ListingPhase::Loading,
            catalog: Vec::new(),
            filters,
            sort,
            view_mode: ViewMode::default(),
            visible: Vec::new(),
        }
    }

    /// Seed from `query`, wait out the simulated fetch, then load a generated catalog.
    pub async fn mount(
        query: &ListingQuery,
        generator: &CatalogGenerator,
        config: &ListingConfig,
        delay: &dyn Delay,
    ) -> Self {
        let mut view = Self::new(query.seed_filters(), query.sort());
        delay.wait(config.latency).await;
        view.load(generator.generate(config.catalog_size));
        info!(
            total = view.total(),
            visible = view.visible.len(),
            active_filters = view.filters.active_dimensions(),
            "Product listing ready"
        );
        view
    }

    /// Install the catalog and become ready.
    pub fn load(&mut self, catalog: Vec<Product>) {
        self.catalog = catalog;
        self.phase = ListingPhase::Ready;
        self.refresh();
    }

    /// Apply an action. Filter and sort changes recompute the visible products.
    pub fn update(&mut self, action: ListingAction) -> Result<(), CommerceError> {
        debug!(?action, "Listing action");
        match action {
            ListingAction::Toggle(toggle) => {
                self.filters.toggle(toggle);
            }
            ListingAction::SetPriceRange { min, max } => {
                self.filters.set_price_range(min, max)?;
            }
            ListingAction::SetSort(option) => self.sort = option,
            ListingAction::ClearFilters => {
                self.filters.clear();
                self.sort = SortOption::default();
            }
            ListingAction::SetViewMode(mode) => {
                self.view_mode = mode;
                return Ok(());
            }
        }
        self.refresh();
        Ok(())
    }

    fn refresh(&mut self) {
        self.visible = sort(&apply(&self.catalog, &self.filters), self.sort);
    }

    pub fn phase(&self) -> ListingPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListingPhase::Loading
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort_option(&self) -> SortOption {
        self.sort
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Full catalog.
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// Filtered and sorted products.
    pub fn visible(&self) -> &[Product] {
        &self.visible
    }

    /// Catalog size.
    pub fn total(&self) -> usize {
        self.catalog.len()
    }

    /// Ready, but nothing passes the filters.
    pub fn is_empty(&self) -> bool {
        self.phase == ListingPhase::Ready && self.visible.is_empty()
    }

    /// "Showing X of Y products".
    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} products",
            self.visible.len(),
            self.catalog.len()
        )
    }

    /// Query string reproducing the current filters and sort.
    pub fn share_query(&self) -> ListingQuery {
        ListingQuery::from_filters(&self.filters, self.sort)
    }
}
