//! The listing query string.
//!
//! Finders hand their answers to the product listing as a URL query string
//! such as `occasion=birthday&recipient=for-her&priceMax=100000`. The listing
//! reads it once on mount to seed its [`FilterState`] and can emit its current
//! state back as a shareable query.
//!
//! Recognized keys:
//!
//! | Key | Dimension | Values |
//! |---|---|---|
//! | `type`, `category` | categories | comma list of category slugs |
//! | `accessory` | accessories | comma list of category slugs |
//! | `for`, `recipient` | recipients | comma list of recipient slugs |
//! | `features` | features | comma list of feature slugs |
//! | `occasion` | occasions | one occasion per parameter (free text allowed) |
//! | `priceMin`, `priceMax` | price | whole currency units |
//! | `sort` | sort order | sort slug |
//!
//! Unknown keys are ignored. Unknown values are logged and skipped.

use crate::catalog::{Category, Feature, Occasion, Recipient};
use crate::search::{FilterState, PriceRange, SortOption};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::warn;

/// Recognized parameter names.
pub mod keys {
    pub const KEY_TYPE: &str = "type";
    pub const KEY_CATEGORY: &str = "category";
    pub const KEY_ACCESSORY: &str = "accessory";
    pub const KEY_FOR: &str = "for";
    pub const KEY_RECIPIENT: &str = "recipient";
    pub const KEY_FEATURES: &str = "features";
    pub const KEY_OCCASION: &str = "occasion";
    pub const KEY_PRICE_MIN: &str = "priceMin";
    pub const KEY_PRICE_MAX: &str = "priceMax";
    pub const KEY_SORT: &str = "sort";
}

use keys::*;

/// Ordered key/value parameters of a listing URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    params: Vec<(String, String)>,
}

impl ListingQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let params = query
            .trim()
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (decode(k), decode(v)),
                None => (decode(pair), String::new()),
            })
            .collect();
        Self { params }
    }

    /// Append a parameter.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Replace every value for `key` with one value, appended last.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        self.params.retain(|(k, _)| *k != key);
        self.append(key, value)
    }

    /// Append a comma-joined list parameter; skipped when `values` is empty.
    pub fn append_list<I, S>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        if !joined.is_empty() {
            self.append(key, joined);
        }
        self
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.params
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Parameters in order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Percent-encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Listing path carrying this query.
    pub fn to_path(&self) -> String {
        if self.is_empty() {
            "/products".to_string()
        } else {
            format!("/products?{}", self.to_query_string())
        }
    }

    /// Filter state seeded from the recognized keys.
    pub fn seed_filters(&self) -> FilterState {
        let mut filters = FilterState::new();

        for key in [KEY_TYPE, KEY_CATEGORY] {
            self.collect_slugs(key, Category::from_slug, &mut filters.categories);
        }
        self.collect_slugs(KEY_ACCESSORY, Category::from_slug, &mut filters.accessories);
        for key in [KEY_FOR, KEY_RECIPIENT] {
            self.collect_slugs(key, Recipient::from_slug, &mut filters.recipients);
        }
        self.collect_slugs(KEY_FEATURES, Feature::from_slug, &mut filters.features);

        filters
            .occasions
            .extend(self.get_all(KEY_OCCASION).filter_map(Occasion::parse));

        let min = self.price_param(KEY_PRICE_MIN).unwrap_or(0);
        let max = self
            .price_param(KEY_PRICE_MAX)
            .unwrap_or(PriceRange::DEFAULT_MAX);
        filters.price = PriceRange::new(min, max).unwrap_or_else(|_| {
            warn!(min, max, "Ignoring priceMin above priceMax");
            PriceRange::up_to(max)
        });

        filters
    }

    /// Sort order from `sort`, defaulting to featured.
    pub fn sort(&self) -> SortOption {
        match self.get(KEY_SORT) {
            Some(slug) => SortOption::from_slug(slug).unwrap_or_else(|| {
                warn!(value = slug, "Ignoring unknown sort option");
                SortOption::default()
            }),
            None => SortOption::default(),
        }
    }

    /// Query reproducing `filters` and `sort`. Defaults are omitted.
    pub fn from_filters(filters: &FilterState, sort: SortOption) -> Self {
        let mut query = Self::new();
        query.append_list(KEY_TYPE, filters.categories.iter().map(|c| c.slug()));
        query.append_list(KEY_FOR, filters.recipients.iter().map(|r| r.slug()));
        query.append_list(KEY_FEATURES, filters.features.iter().map(|f| f.slug()));
        query.append_list(KEY_ACCESSORY, filters.accessories.iter().map(|c| c.slug()));
        for occasion in &filters.occasions {
            query.append(KEY_OCCASION, occasion.slug());
        }
        if filters.price.min() > 0 {
            query.append(KEY_PRICE_MIN, filters.price.min().to_string());
        }
        if filters.price.max() != PriceRange::DEFAULT_MAX {
            query.append(KEY_PRICE_MAX, filters.price.max().to_string());
        }
        if sort != SortOption::default() {
            query.append(KEY_SORT, sort.slug());
        }
        query
    }

    fn collect_slugs<T: Ord>(
        &self,
        key: &str,
        lookup: impl Fn(&str) -> Option<T>,
        into: &mut BTreeSet<T>,
    ) {
        for slug in self
            .get_all(key)
            .flat_map(|v| v.split(','))
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            match lookup(slug) {
                Some(value) => {
                    into.insert(value);
                }
                None => warn!(key, value = slug, "Ignoring unknown filter value"),
            }
        }
    }

    fn price_param(&self, key: &str) -> Option<u64> {
        let raw = self.get(key)?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(key, value = raw, "Ignoring non-numeric price");
                None
            }
        }
    }
}

impl fmt::Display for ListingQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Form-style encoding: unreserved characters pass, space becomes `+`.
fn encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
            ' ' => result.push('+'),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}

/// Inverse of [`encode`]. Malformed escapes are kept verbatim.
fn decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match hex_byte(bytes[i + 1], bytes[i + 2]) {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_byte(hi: u8, lo: u8) -> Option<u8> {
    let digit = |b: u8| (b as char).to_digit(16);
    Some((digit(hi)? * 16 + digit(lo)?) as u8)
}
