//! End-to-end flows: finder answers land on a seeded product listing.

use futures::executor::block_on;
use muno_commerce::prelude::*;
use std::time::Duration;

fn config() -> ListingConfig {
    ListingConfig {
        catalog_size: 24,
        latency: Duration::from_millis(800),
    }
}

fn mount(query: &ListingQuery, seed: u64) -> ProductListView {
    block_on(ProductListView::mount(
        query,
        &CatalogGenerator::new().with_seed(seed),
        &config(),
        &InstantDelay,
    ))
}

fn gift(finder: &mut GiftFinder, answer: GiftAnswer) {
    finder.update(FinderAction::Answer(answer)).unwrap();
}

#[test]
fn empty_query_shows_whole_catalog_in_order() {
    let view = mount(&ListingQuery::new(), 99);
    let expected = CatalogGenerator::new().with_seed(99).generate(24);

    assert_eq!(view.visible(), expected.as_slice());
    assert_eq!(view.summary(), "Showing 24 of 24 products");
    assert!(!view.is_empty());
}

#[test]
fn gift_finder_birthday_seeds_occasion_exactly() {
    let mut finder = GiftFinder::default();
    gift(
        &mut finder,
        GiftAnswer::Occasion(OccasionSelection::Preset(Occasion::Birthday)),
    );
    finder.update(FinderAction::Next).unwrap();
    gift(&mut finder, GiftAnswer::Recipient(Recipient::ForHer));
    finder.update(FinderAction::Next).unwrap();
    finder.update(FinderAction::Next).unwrap();

    let Ok(Transition::Submitted(query)) = finder.update(FinderAction::Next) else {
        panic!("gift finder did not submit");
    };
    let view = mount(&query, 7);
    let filters = view.filters();

    assert_eq!(
        filters.occasions.iter().cloned().collect::<Vec<_>>(),
        vec![Occasion::Birthday]
    );
    assert!(filters.categories.is_empty());
    assert!(filters.accessories.is_empty());
    assert!(filters.features.is_empty());
    assert_eq!(
        filters.recipients.iter().copied().collect::<Vec<_>>(),
        vec![Recipient::ForHer]
    );
    assert_eq!(filters.price, PriceRange::up_to(100_000));
    for product in view.visible() {
        assert!(product.occasions.contains(&Occasion::Birthday));
        assert!(product.recipients.contains(&Recipient::ForHer));
        assert!(product.price <= 100_000);
    }
}

#[test]
fn journal_finder_query_is_understood_by_the_listing() {
    let mut finder = JournalFinder::default();
    finder
        .update(FinderAction::Answer(JournalAnswer::JournalType(
            Category::KidsPrayerJournal,
        )))
        .unwrap();
    finder.update(FinderAction::Next).unwrap();
    finder
        .update(FinderAction::Answer(JournalAnswer::Audience(Recipient::ForKids)))
        .unwrap();
    finder.update(FinderAction::Next).unwrap();
    finder
        .update(FinderAction::Answer(JournalAnswer::ToggleFeature(
            Feature::ReflectionPrompts,
        )))
        .unwrap();

    let Ok(Transition::Submitted(query)) = finder.update(FinderAction::Next) else {
        panic!("journal finder did not submit");
    };
    let filters = mount(&query, 3).filters().clone();

    assert!(filters.categories.contains(&Category::KidsPrayerJournal));
    assert!(filters.recipients.contains(&Recipient::ForKids));
    assert!(filters.features.contains(&Feature::ReflectionPrompts));
    assert_eq!(filters.active_dimensions(), 3);
}

#[test]
fn single_price_point_returns_exact_matches() {
    let mut view = ProductListView::new(FilterState::new(), SortOption::Featured);
    let catalog = vec![
        Product::new(ProductId::sequence(1), "A", 49_999, Category::DailyJournals),
        Product::new(ProductId::sequence(2), "B", 50_000, Category::DailyJournals),
        Product::new(ProductId::sequence(3), "C", 50_001, Category::GratitudeJars),
        Product::new(ProductId::sequence(4), "D", 50_000, Category::JournalSupplies),
    ];
    view.load(catalog);
    view.update(ListingAction::SetPriceRange {
        min: 50_000,
        max: 50_000,
    })
    .unwrap();

    let ids: Vec<_> = view.visible().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["product-2", "product-4"]);
}

#[test]
fn listing_share_query_round_trips_through_mount() {
    let mut view = mount(&ListingQuery::new(), 11);
    view.update(ListingAction::Toggle(FilterToggle::Feature(Feature::GoalSetting)))
        .unwrap();
    view.update(ListingAction::SetSort(SortOption::PriceHighLow))
        .unwrap();

    let shared = ListingQuery::parse(&view.share_query().to_query_string());
    let remounted = mount(&shared, 11);

    assert_eq!(remounted.filters(), view.filters());
    assert_eq!(remounted.sort_option(), SortOption::PriceHighLow);
    assert_eq!(remounted.visible(), view.visible());
}

#[test]
fn can_proceed_tracks_required_slots() {
    let mut finder = GiftFinder::default();
    assert!(!finder.can_proceed(), "no occasion chosen");

    gift(&mut finder, GiftAnswer::Occasion(OccasionSelection::Other));
    assert!(!finder.can_proceed(), "other without text");

    gift(&mut finder, GiftAnswer::CustomOccasion("Ordination".to_string()));
    assert!(finder.can_proceed(), "other with text");

    finder.update(FinderAction::Next).unwrap();
    assert!(!finder.can_proceed(), "no recipient chosen");
    assert_eq!(
        finder.update(FinderAction::Next),
        Err(FinderError::StepIncomplete { step: 2 })
    );
}
