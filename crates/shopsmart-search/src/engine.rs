//! Conjunctive substring search over product price records.
//!
//! A record matches when every query term occurs somewhere in its haystack
//! (name, category, dietary info and brand). There is no ranking: the result
//! keeps catalog order unless the filters ask for a sort.

use std::collections::BTreeSet;

use shopsmart_core::{ProductPriceRecord, SearchFilters};

use crate::geo::haversine_km;
use crate::sort::{sort_records, SortKey};

/// Lower-cases `query` and splits it into distinct whitespace-separated terms.
#[must_use]
pub fn tokenize(query: &str) -> BTreeSet<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// The lower-cased text a record is matched against.
#[must_use]
pub fn haystack(record: &ProductPriceRecord) -> String {
    [
        record.name.as_str(),
        record.category.as_deref().unwrap_or(""),
        record.dietary_info.as_deref().unwrap_or(""),
        record.brand.as_deref().unwrap_or(""),
    ]
    .join(" ")
    .to_lowercase()
}

fn matches_terms(record: &ProductPriceRecord, terms: &BTreeSet<String>) -> bool {
    let text = haystack(record);
    terms.iter().all(|term| text.contains(term.as_str()))
}

/// Runs `query` with `filters` against `records`.
///
/// A blank query returns nothing; there is no browse-all mode.
#[must_use]
pub fn search(
    query: &str,
    filters: &SearchFilters,
    records: &[ProductPriceRecord],
) -> Vec<ProductPriceRecord> {
    let terms = tokenize(query.trim());
    if terms.is_empty() {
        return Vec::new();
    }

    let matched = records
        .iter()
        .filter(|record| matches_terms(record, &terms))
        .cloned()
        .collect();

    refine(matched, filters)
}

/// Applies the post-match stages: suburb, store set and distance filters,
/// then the optional sort.
///
/// Used directly for provider results, which arrive already matched.
#[must_use]
pub fn refine(
    mut records: Vec<ProductPriceRecord>,
    filters: &SearchFilters,
) -> Vec<ProductPriceRecord> {
    if let Some(suburb) = filters.suburb_filter() {
        let needle = suburb.to_lowercase();
        records.retain(|r| r.suburb.to_lowercase().contains(&needle));
    }

    if !filters.stores.is_empty() {
        records.retain(|r| filters.stores.contains(&r.store));
    }

    if let (Some(origin), Some(max_km)) = (filters.origin, filters.max_distance_km) {
        records.retain(|r| {
            r.coordinates
                .is_some_and(|c| haversine_km(origin, c) <= max_km)
        });
    }

    if let Some(sort_by) = filters.sort_by {
        match SortKey::from_filter(sort_by, filters.origin) {
            Some(key) => sort_records(&mut records, key, filters.effective_order()),
            None => tracing::debug!(
                sort_by = sort_by.as_str(),
                "sort requested without an origin; keeping catalog order"
            ),
        }
    }

    records
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
