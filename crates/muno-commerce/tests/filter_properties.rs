//! Property tests for the filter predicate set and the sort comparators.
//!
//! 1. **Subsequence**: `apply(p, s)` keeps a subset of `p` in the original order.
//! 2. **Soundness**: every kept product satisfies the price interval and
//!    overlaps every non-empty tag dimension.
//! 3. **Completeness**: every dropped product violates at least one constraint.
//! 4. **Idempotence**: `apply(apply(p, s), s) == apply(p, s)`.
//! 5. **Stable price sorts**: equal prices keep their input order.

use muno_commerce::prelude::*;
use proptest::prelude::*;
use proptest::sample::subsequence;

// ── Strategies ──────────────────────────────────────────────────────────

fn catalog() -> impl Strategy<Value = Vec<Product>> {
    (any::<u64>(), 0usize..60).prop_map(|(seed, count)| {
        CatalogGenerator::new().with_seed(seed).generate(count)
    })
}

fn filter_state() -> impl Strategy<Value = FilterState> {
    (
        subsequence(Category::ALL.to_vec(), 0..=3),
        subsequence(Recipient::ALL.to_vec(), 0..=3),
        subsequence(Feature::ALL.to_vec(), 0..=3),
        subsequence(Category::ACCESSORIES.to_vec(), 0..=2),
        subsequence(Occasion::presets().to_vec(), 0..=3),
        (0u64..=200_000, 0u64..=200_000),
    )
        .prop_map(|(categories, recipients, features, accessories, occasions, (a, b))| {
            let mut state = FilterState::new();
            state.categories.extend(categories);
            state.recipients.extend(recipients);
            state.features.extend(features);
            state.accessories.extend(accessories);
            state.occasions.extend(occasions);
            state.price = PriceRange::new(a.min(b), a.max(b)).expect("ordered bounds");
            state
        })
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn satisfies(product: &Product, state: &FilterState) -> bool {
    let price_ok = state.price.min() <= product.price && product.price <= state.price.max();
    let category_ok = state.categories.is_empty() || state.categories.contains(&product.category);
    let accessory_ok =
        state.accessories.is_empty() || state.accessories.contains(&product.category);
    let recipient_ok = state.recipients.is_empty()
        || product.recipients.iter().any(|r| state.recipients.contains(r));
    let feature_ok =
        state.features.is_empty() || product.features.iter().any(|f| state.features.contains(f));
    let occasion_ok = state.occasions.is_empty()
        || product.occasions.iter().any(|o| state.occasions.contains(o));
    price_ok && category_ok && accessory_ok && recipient_ok && feature_ok && occasion_ok
}

fn is_subsequence(needle: &[Product], haystack: &[Product]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|p| rest.any(|q| q == p))
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn apply_is_an_ordered_subsequence(products in catalog(), state in filter_state()) {
        let kept = apply(&products, &state);
        prop_assert!(kept.len() <= products.len());
        prop_assert!(is_subsequence(&kept, &products));
    }

    #[test]
    fn apply_keeps_exactly_the_matching_products(products in catalog(), state in filter_state()) {
        let kept = apply(&products, &state);
        for product in &products {
            let is_kept = kept.iter().any(|k| k.id == product.id);
            prop_assert_eq!(is_kept, satisfies(product, &state), "product {}", product.id);
        }
    }

    #[test]
    fn apply_is_idempotent(products in catalog(), state in filter_state()) {
        let once = apply(&products, &state);
        let twice = apply(&once, &state);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn price_sorts_are_ordered_and_stable(products in catalog()) {
        for option in [SortOption::PriceLowHigh, SortOption::PriceHighLow] {
            let sorted = sort(&products, option);
            prop_assert_eq!(sorted.len(), products.len());
            for pair in sorted.windows(2) {
                match option {
                    SortOption::PriceLowHigh => prop_assert!(pair[0].price <= pair[1].price),
                    _ => prop_assert!(pair[0].price >= pair[1].price),
                }
                if pair[0].price == pair[1].price {
                    // Generated ids are ascending, so input order is id order.
                    let a = pair[0].id.sequence_number();
                    let b = pair[1].id.sequence_number();
                    prop_assert!(a < b);
                }
            }
        }
    }

    #[test]
    fn featured_sort_is_identity(products in catalog()) {
        prop_assert_eq!(sort(&products, SortOption::Featured), products);
    }

    #[test]
    fn toggle_is_an_involution(state in filter_state(), value in subsequence(Feature::ALL.to_vec(), 1)) {
        let mut toggled = state.clone();
        let toggle = FilterToggle::Feature(value[0]);
        toggled.toggle(toggle.clone());
        toggled.toggle(toggle);
        prop_assert_eq!(toggled, state);
    }
}
