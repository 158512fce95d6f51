use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A retailer a price was observed at.
///
/// The five chains the comparison covers get their own variants; anything
/// else is carried verbatim in [`Store::Other`]. Serialized as its display
/// name (`"IGA"`, not `"Iga"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Store {
    Woolworths,
    Coles,
    Iga,
    Aldi,
    Costco,
    Other(String),
}

impl Store {
    /// Every named chain, in the order the filter popover lists them.
    pub const KNOWN: [Store; 5] = [
        Store::Woolworths,
        Store::Coles,
        Store::Iga,
        Store::Aldi,
        Store::Costco,
    ];

    /// Parses a canonical display name. Matching is exact: `"coles"` is
    /// not `"Coles"` and comes back as [`Store::Other`].
    #[must_use]
    pub fn from_display_name(name: &str) -> Self {
        match name {
            "Woolworths" => Store::Woolworths,
            "Coles" => Store::Coles,
            "IGA" => Store::Iga,
            "Aldi" => Store::Aldi,
            "Costco" => Store::Costco,
            other => Store::Other(other.to_owned()),
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Store::Woolworths => "Woolworths",
            Store::Coles => "Coles",
            Store::Iga => "IGA",
            Store::Aldi => "Aldi",
            Store::Costco => "Costco",
            Store::Other(name) => name,
        }
    }

    /// Lower-case identifier the pricing provider uses for this store.
    #[must_use]
    pub fn provider_id(&self) -> String {
        self.display_name().to_lowercase()
    }
}

impl std::fmt::Display for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl From<String> for Store {
    fn from(value: String) -> Self {
        Store::from_display_name(&value)
    }
}

impl From<Store> for String {
    fn from(value: Store) -> Self {
        match value {
            Store::Other(name) => name,
            known => known.display_name().to_owned(),
        }
    }
}

/// A WGS-84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One observed shelf price for a product at a specific store.
///
/// `price` and `unit_price` are both supplied by the source; `unit_price`
/// is never derived from `price` and `size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPriceRecord {
    pub id: String,
    pub name: String,
    pub store: Store,
    /// Shelf price in dollars, e.g. `"6.50"`.
    pub price: Decimal,
    /// Price per normalized unit (see `unit`).
    pub unit_price: Decimal,
    /// Unit label for `unit_price`, e.g. `"per kg"`.
    pub unit: String,
    /// Street address of the store.
    pub location: String,
    pub suburb: String,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-form dietary tags, e.g. `"Gluten Free"` or `"Low Carb, High Protein"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Pack size label, e.g. `"500g"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Store position, when known. Distance filtering and sorting skip
    /// records without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
}
