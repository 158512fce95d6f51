use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::records::{GeoPoint, Store};

/// Field a result list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    Price,
    #[serde(alias = "unitPrice")]
    UnitPrice,
    #[serde(alias = "lastUpdated")]
    LastUpdated,
    Distance,
}

impl SortBy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Price => "price",
            SortBy::UnitPrice => "unit_price",
            SortBy::LastUpdated => "last_updated",
            SortBy::Distance => "distance",
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(SortBy::Price),
            "unit_price" | "unitPrice" => Ok(SortBy::UnitPrice),
            "last_updated" | "lastUpdated" => Ok(SortBy::LastUpdated),
            "distance" => Ok(SortBy::Distance),
            other => Err(format!("unknown sort field '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

/// Narrowing and ordering applied to one search.
///
/// Callers build the whole value; the controller replaces its filters
/// wholesale and never merges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Case-insensitive substring matched against the record suburb.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    /// Allowed stores. Empty means every store.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub stores: BTreeSet<Store>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    /// Where distances are measured from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<GeoPoint>,
    /// Only honoured together with `origin`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance_km: Option<f64>,
}

impl SearchFilters {
    #[must_use]
    pub fn with_stores<I>(stores: I) -> Self
    where
        I: IntoIterator<Item = Store>,
    {
        Self {
            stores: stores.into_iter().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sorted_by(sort_by: SortBy) -> Self {
        Self {
            sort_by: Some(sort_by),
            ..Self::default()
        }
    }

    /// The suburb filter, ignoring a blank value.
    #[must_use]
    pub fn suburb_filter(&self) -> Option<&str> {
        self.suburb.as_deref().filter(|s| !s.trim().is_empty())
    }

    #[must_use]
    pub fn effective_order(&self) -> SortOrder {
        self.sort_order.unwrap_or_default()
    }

    /// Number of active narrowing/ordering choices, as shown on the filter
    /// button badge: suburb, store set and sort field count one each.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        [
            self.suburb_filter().is_some(),
            !self.stores.is_empty(),
            self.sort_by.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}
