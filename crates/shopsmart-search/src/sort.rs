//! Ordering of result lists.
//!
//! The filter-driven sort in [`crate::engine`] and the click-to-sort result
//! table both go through [`compare_records`], so the two can never disagree.
//!
//! Every key has an "ascending" baseline that puts the best row first:
//! cheapest price, cheapest unit price, freshest observation, nearest store,
//! store name A–Z. `Desc` reverses the baseline for every key, which makes
//! `last_updated` descending oldest-first.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use shopsmart_core::{GeoPoint, ProductPriceRecord, SortBy, SortOrder};

use crate::geo::haversine_km;

/// A resolved comparison key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortKey {
    Store,
    Price,
    UnitPrice,
    LastUpdated,
    /// Distance from the given origin.
    Distance(GeoPoint),
}

impl SortKey {
    /// Resolves a filter sort field. Distance needs an origin; without one
    /// there is nothing to compare and `None` is returned.
    #[must_use]
    pub fn from_filter(sort_by: SortBy, origin: Option<GeoPoint>) -> Option<Self> {
        match sort_by {
            SortBy::Price => Some(SortKey::Price),
            SortBy::UnitPrice => Some(SortKey::UnitPrice),
            SortBy::LastUpdated => Some(SortKey::LastUpdated),
            SortBy::Distance => origin.map(SortKey::Distance),
        }
    }
}

/// Compares two records under `key` and `order`.
#[must_use]
pub fn compare_records(
    a: &ProductPriceRecord,
    b: &ProductPriceRecord,
    key: SortKey,
    order: SortOrder,
) -> Ordering {
    let baseline = match key {
        SortKey::Price => a.price.cmp(&b.price),
        SortKey::UnitPrice => a.unit_price.cmp(&b.unit_price),
        SortKey::LastUpdated => b.last_updated.cmp(&a.last_updated),
        SortKey::Store => compare_store_names(a, b),
        SortKey::Distance(origin) => {
            let da = a.coordinates.map(|c| haversine_km(origin, c));
            let db = b.coordinates.map(|c| haversine_km(origin, c));
            return match (da, db) {
                (Some(x), Some(y)) => apply_order(x.total_cmp(&y), order),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
        }
    };
    apply_order(baseline, order)
}

/// Stable in-place sort.
pub fn sort_records(records: &mut [ProductPriceRecord], key: SortKey, order: SortOrder) {
    records.sort_by(|a, b| compare_records(a, b, key, order));
}

fn apply_order(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn compare_store_names(a: &ProductPriceRecord, b: &ProductPriceRecord) -> Ordering {
    let (na, nb) = (a.store.display_name(), b.store.display_name());
    na.to_lowercase()
        .cmp(&nb.to_lowercase())
        .then_with(|| na.cmp(nb))
}

/// A sortable column of the result table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableColumn {
    Store,
    #[default]
    Price,
    #[serde(alias = "unitPrice")]
    UnitPrice,
    #[serde(alias = "lastUpdated")]
    LastUpdated,
}

impl From<TableColumn> for SortKey {
    fn from(column: TableColumn) -> Self {
        match column {
            TableColumn::Store => SortKey::Store,
            TableColumn::Price => SortKey::Price,
            TableColumn::UnitPrice => SortKey::UnitPrice,
            TableColumn::LastUpdated => SortKey::LastUpdated,
        }
    }
}

/// Click-to-sort state of the result table. Starts on price, ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSort {
    pub column: TableColumn,
    pub order: SortOrder,
}

impl TableSort {
    /// Clicking the active column flips direction; clicking another column
    /// selects it ascending.
    pub fn toggle(&mut self, column: TableColumn) {
        if self.column == column {
            self.order = self.order.flipped();
        } else {
            self.column = column;
            self.order = SortOrder::Asc;
        }
    }

    /// Returns a sorted copy of `records`.
    #[must_use]
    pub fn apply(&self, records: &[ProductPriceRecord]) -> Vec<ProductPriceRecord> {
        let mut rows = records.to_vec();
        sort_records(&mut rows, self.column.into(), self.order);
        rows
    }

    /// The cheapest row is highlighted only while the table is ordered by
    /// price, cheapest first.
    #[must_use]
    pub fn highlights_best_price(&self) -> bool {
        self.column == TableColumn::Price && self.order == SortOrder::Asc
    }
}
