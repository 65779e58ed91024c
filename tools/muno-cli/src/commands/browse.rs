//! Browse the product listing.

use anyhow::{bail, Result};
use muno_commerce::search::{keys, ListingAction, ListingQuery, ProductListView, ViewMode};
use serde::Serialize;

use super::BrowseArgs;
use crate::context::Context;
use crate::delay::TokioDelay;

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let Some(view_mode) = ViewMode::from_slug(&args.view) else {
        bail!("Unknown view '{}' (expected grid or list)", args.view);
    };
    let query = build_query(&args);
    ctx.output.debug(&format!("Listing query: {}", query.to_path()));

    let mut view = open_listing(&query, ctx).await?;
    view.update(ListingAction::SetViewMode(view_mode))?;
    render(&view, ctx);

    Ok(())
}

/// Mount the listing for `query`, with a spinner while the catalog loads.
pub async fn open_listing(query: &ListingQuery, ctx: &Context) -> Result<ProductListView> {
    let generator = ctx.config.generator()?;
    let config = ctx.config.listing_config();

    let spinner = ctx.output.spinner("Loading products...");
    let view = ProductListView::mount(query, &generator, &config, &TokioDelay).await;
    spinner.finish_and_clear();

    ctx.logger
        .for_view("listing")
        .info_builder("Listing opened")
        .field("query", query.to_query_string())
        .field_u64("total", view.total() as u64)
        .field_u64("visible", view.visible().len() as u64)
        .field("sort", view.sort_option().slug())
        .emit();

    Ok(view)
}

#[derive(Serialize)]
struct ListingReport<'a> {
    summary: String,
    total: usize,
    sort: &'static str,
    active_filters: Vec<String>,
    share_path: String,
    products: &'a [muno_commerce::catalog::Product],
}

/// Print the listing: summary, active filters, and products or the empty state.
pub fn render(view: &ProductListView, ctx: &Context) {
    let share_path = view.share_query().to_path();

    if ctx.output.is_json() {
        ctx.output.json(&ListingReport {
            summary: view.summary(),
            total: view.total(),
            sort: view.sort_option().slug(),
            active_filters: view.filters().selected_labels(),
            share_path,
            products: view.visible(),
        });
        return;
    }

    ctx.output.header("Products");
    ctx.output.info(&view.summary());
    ctx.output.kv("Sort", view.sort_option().display_name());
    let price = view.filters().price;
    ctx.output
        .kv("Price", &format!("{} - {}", price.min(), price.max()));
    let labels = view.filters().selected_labels();
    if !labels.is_empty() {
        ctx.output.kv("Filters", &labels.join(", "));
    }

    if view.is_empty() {
        ctx.output.info("");
        ctx.output.warn("No products match your filters");
        ctx.output.info("Run `muno browse` with no filters to see everything");
        return;
    }

    if view.view_mode() == ViewMode::Grid {
        ctx.output.info("");
        ctx.output
            .table_row(&["ID", "Name", "Price", "Stock"], &[12, 32, 14, 12]);
    }
    for product in view.visible() {
        ctx.output.product(product, view.view_mode());
    }

    ctx.output.info("");
    ctx.output.kv("Share", &share_path);
}

/// Listing query from the raw `--query` plus the individual filter flags.
/// Price and sort flags replace the same keys from `--query`.
fn build_query(args: &BrowseArgs) -> ListingQuery {
    let mut query = args
        .query
        .as_deref()
        .map(ListingQuery::parse)
        .unwrap_or_default();

    query
        .append_list(keys::KEY_TYPE, &args.types)
        .append_list(keys::KEY_FOR, &args.audiences)
        .append_list(keys::KEY_FEATURES, &args.features)
        .append_list(keys::KEY_ACCESSORY, &args.accessories);
    for occasion in &args.occasions {
        query.append(keys::KEY_OCCASION, occasion.as_str());
    }
    if let Some(min) = args.min {
        query.set(keys::KEY_PRICE_MIN, min.to_string());
    }
    if let Some(max) = args.max {
        query.set(keys::KEY_PRICE_MAX, max.to_string());
    }
    if let Some(sort) = &args.sort {
        query.set(keys::KEY_SORT, sort.as_str());
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use muno_commerce::catalog::{Category, Occasion, Recipient};
    use muno_commerce::search::SortOption;

    #[test]
    fn test_flags_build_query() {
        let args = BrowseArgs {
            types: vec!["daily-journals".to_string()],
            audiences: vec!["for-kids".to_string(), "for-teens".to_string()],
            occasions: vec!["Baby Shower".to_string()],
            max: Some(80_000),
            sort: Some("newest".to_string()),
            ..BrowseArgs::default()
        };
        let query = build_query(&args);
        assert_eq!(
            query.to_query_string(),
            "type=daily-journals&for=for-kids%2Cfor-teens&occasion=Baby+Shower&priceMax=80000&sort=newest"
        );

        let filters = query.seed_filters();
        assert!(filters.categories.contains(&Category::DailyJournals));
        assert!(filters.recipients.contains(&Recipient::ForTeens));
        assert!(filters
            .occasions
            .contains(&Occasion::Custom("Baby Shower".to_string())));
        assert_eq!(filters.price.max(), 80_000);
        assert_eq!(query.sort(), SortOption::Newest);
    }

    #[test]
    fn test_raw_query_and_flags_combine() {
        let args = BrowseArgs {
            query: Some("?features=goal-setting".to_string()),
            min: Some(50_000),
            ..BrowseArgs::default()
        };
        let query = build_query(&args);
        assert_eq!(query.get(keys::KEY_FEATURES), Some("goal-setting"));
        assert_eq!(query.seed_filters().price.min(), 50_000);
    }

    #[test]
    fn test_price_and_sort_flags_override_raw_query() {
        let args = BrowseArgs {
            query: Some("sort=newest&priceMin=10000&priceMax=50000".to_string()),
            min: Some(20_000),
            max: Some(90_000),
            sort: Some("price-low-high".to_string()),
            ..BrowseArgs::default()
        };
        let query = build_query(&args);
        assert_eq!(query.sort(), SortOption::PriceLowHigh);
        let filters = query.seed_filters();
        assert_eq!(filters.price.min(), 20_000);
        assert_eq!(filters.price.max(), 90_000);
        assert_eq!(
            query.to_query_string(),
            "priceMin=20000&priceMax=90000&sort=price-low-high"
        );
    }
}
