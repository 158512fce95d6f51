use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use shopsmart_core::{GeoPoint, SortBy, SortOrder, Store};

use super::*;
use crate::catalog::StaticCatalog;

fn mock_records() -> Vec<ProductPriceRecord> {
    StaticCatalog::mock()
        .expect("embedded catalog is valid")
        .records()
        .to_vec()
}

fn milk(id: &str, store: Store, cents: i64) -> ProductPriceRecord {
    ProductPriceRecord {
        id: id.to_owned(),
        name: "Milk 1L".to_owned(),
        store,
        price: Decimal::new(cents, 2),
        unit_price: Decimal::new(cents, 2),
        unit: "per litre".to_owned(),
        location: "1 Test Street".to_owned(),
        suburb: "Sydney CBD".to_owned(),
        last_updated: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
        category: Some("Dairy".to_owned()),
        dietary_info: None,
        brand: None,
        size: None,
        description: None,
        image_url: None,
        coordinates: None,
    }
}

fn ids(records: &[ProductPriceRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

// -----------------------------------------------------------------------
// tokenize / haystack
// -----------------------------------------------------------------------

#[test]
fn tokenize_lowercases_and_deduplicates() {
    let terms = tokenize("  Bread   bread GLUTEN ");
    assert_eq!(terms.len(), 2);
    assert!(terms.contains("bread"));
    assert!(terms.contains("gluten"));
}

#[test]
fn haystack_treats_missing_fields_as_empty() {
    let record = milk("m", Store::Coles, 230);
    assert_eq!(haystack(&record), "milk 1l dairy  ");
}

// -----------------------------------------------------------------------
// matching
// -----------------------------------------------------------------------

#[test]
fn blank_queries_return_nothing() {
    let records = mock_records();
    assert!(search("", &SearchFilters::default(), &records).is_empty());
    assert!(search("   ", &SearchFilters::default(), &records).is_empty());
}

#[test]
fn every_term_appears_in_every_result() {
    let records = mock_records();
    for query in ["milk", "gluten free bread", "Greek yoghurt", "dairy organic", "bread"] {
        let results = search(query, &SearchFilters::default(), &records);
        assert!(!results.is_empty(), "{query:?} should match something");
        for record in &results {
            let text = haystack(record);
            for term in tokenize(query) {
                assert!(
                    text.contains(&term),
                    "{} returned for {query:?} but lacks {term:?}",
                    record.id
                );
            }
        }
    }
}

#[test]
fn gluten_free_bread_matches_conjunctively() {
    let records = mock_records();
    let results = search("gluten free bread", &SearchFilters::default(), &records);
    assert_eq!(
        ids(&results),
        ["gf-bread-1", "gf-bread-2", "gf-bread-3", "gf-bread-4"]
    );
    assert!(!ids(&results).contains(&"rice-1"));
}

#[test]
fn brand_and_dietary_info_are_searchable() {
    let records = mock_records();
    let chobani = search("chobani", &SearchFilters::default(), &records);
    assert_eq!(ids(&chobani), ["yoghurt-1", "yoghurt-2"]);

    let protein = search("high protein", &SearchFilters::default(), &records);
    assert_eq!(ids(&protein), ["keto-bread-1"]);
}

#[test]
fn terms_match_as_substrings() {
    let records = mock_records();
    let results = search("yog", &SearchFilters::default(), &records);
    assert_eq!(results.len(), 4);
}

#[test]
fn unsorted_results_keep_catalog_order() {
    let records = mock_records();
    let results = search("milk", &SearchFilters::default(), &records);
    assert_eq!(ids(&results), ["organic-milk-1", "milk-1", "milk-2"]);
}

// -----------------------------------------------------------------------
// filters
// -----------------------------------------------------------------------

#[test]
fn store_filter_keeps_only_listed_stores() {
    let records = mock_records();
    let filters = SearchFilters::with_stores([Store::Coles]);
    let results = search("bread", &filters, &records);
    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r.store == Store::Coles));
}

#[test]
fn store_filter_is_exact() {
    let records = mock_records();
    let filters = SearchFilters::with_stores([Store::Other("coles".to_owned())]);
    assert!(search("bread", &filters, &records).is_empty());
}

#[test]
fn suburb_filter_is_case_insensitive_substring() {
    let mut records = mock_records();
    let mut north = milk("north-sydney", Store::Aldi, 199);
    north.suburb = "North Sydney".to_owned();
    records.push(north);

    let filters = SearchFilters {
        suburb: Some("sydney".to_owned()),
        ..SearchFilters::default()
    };
    let results = search("milk", &filters, &records);
    assert_eq!(
        ids(&results),
        ["organic-milk-1", "milk-1", "milk-2", "north-sydney"]
    );

    let paddington = SearchFilters {
        suburb: Some("PADD".to_owned()),
        ..SearchFilters::default()
    };
    let results = search("bread", &paddington, &records);
    assert_eq!(ids(&results), ["gf-bread-3", "keto-bread-1"]);
}

#[test]
fn distance_filter_requires_coordinates_within_radius() {
    let mut records = mock_records();
    records.push(milk("no-coords", Store::Aldi, 199));

    let george_st = GeoPoint::new(-33.870_5, 151.207_3);
    let filters = SearchFilters {
        origin: Some(george_st),
        max_distance_km: Some(1.0),
        ..SearchFilters::default()
    };
    let results = search("bread", &filters, &records);
    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r.suburb == "Sydney CBD"));

    let milk_results = search("milk", &filters, &records);
    assert!(!ids(&milk_results).contains(&"no-coords"));
}

#[test]
fn max_distance_without_origin_is_ignored() {
    let records = mock_records();
    let filters = SearchFilters {
        max_distance_km: Some(0.1),
        ..SearchFilters::default()
    };
    assert_eq!(search("bread", &filters, &records).len(), 6);
}

// -----------------------------------------------------------------------
// sorting
// -----------------------------------------------------------------------

#[test]
fn two_milks_sorted_by_price_put_coles_first() {
    let records = vec![
        milk("woolies", Store::Woolworths, 250),
        milk("coles", Store::Coles, 230),
    ];
    let results = search("milk", &SearchFilters::sorted_by(SortBy::Price), &records);
    assert_eq!(ids(&results), ["coles", "woolies"]);
}

#[test]
fn price_ascending_is_non_decreasing() {
    let records = mock_records();
    let results = search("bread", &SearchFilters::sorted_by(SortBy::Price), &records);
    assert!(results.windows(2).all(|w| w[0].price <= w[1].price));
}

#[test]
fn unit_price_descending_is_non_increasing() {
    let records = mock_records();
    let filters = SearchFilters {
        sort_by: Some(SortBy::UnitPrice),
        sort_order: Some(SortOrder::Desc),
        ..SearchFilters::default()
    };
    let results = search("dairy", &filters, &records);
    assert!(results.windows(2).all(|w| w[0].unit_price >= w[1].unit_price));
}

#[test]
fn last_updated_default_direction_is_most_recent_first() {
    let records = mock_records();
    let results = search("bread", &SearchFilters::sorted_by(SortBy::LastUpdated), &records);
    assert!(results
        .windows(2)
        .all(|w| w[0].last_updated >= w[1].last_updated));
    assert_eq!(results[0].store, Store::Iga);
}

#[test]
fn last_updated_descending_is_oldest_first() {
    let records = mock_records();
    let filters = SearchFilters {
        sort_by: Some(SortBy::LastUpdated),
        sort_order: Some(SortOrder::Desc),
        ..SearchFilters::default()
    };
    let results = search("bread", &filters, &records);
    assert!(results
        .windows(2)
        .all(|w| w[0].last_updated <= w[1].last_updated));
}

#[test]
fn distance_sort_orders_nearest_first() {
    let records = mock_records();
    let paddington = GeoPoint::new(-33.884_6, 151.226_9);
    let filters = SearchFilters {
        sort_by: Some(SortBy::Distance),
        origin: Some(paddington),
        ..SearchFilters::default()
    };
    let results = search("bread", &filters, &records);
    assert_eq!(results[0].suburb, "Paddington");
    assert_eq!(results[1].suburb, "Paddington");
}

#[test]
fn distance_sort_without_origin_keeps_catalog_order() {
    let records = mock_records();
    let unsorted = search("bread", &SearchFilters::default(), &records);
    let sorted = search("bread", &SearchFilters::sorted_by(SortBy::Distance), &records);
    assert_eq!(unsorted, sorted);
}

#[test]
fn search_is_idempotent() {
    let records = mock_records();
    let filters = SearchFilters {
        sort_by: Some(SortBy::Price),
        stores: [Store::Coles, Store::Woolworths].into_iter().collect(),
        ..SearchFilters::default()
    };
    let first = search("yoghurt natural", &filters, &records);
    let second = search("yoghurt natural", &filters, &records);
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[test]
fn refine_applies_filters_without_matching() {
    let records = vec![
        milk("woolies", Store::Woolworths, 250),
        milk("coles", Store::Coles, 230),
    ];
    let filters = SearchFilters {
        sort_by: Some(SortBy::Price),
        sort_order: Some(SortOrder::Desc),
        ..SearchFilters::default()
    };
    assert_eq!(ids(&refine(records, &filters)), ["woolies", "coles"]);
}
