//! Wire types for the pricing provider's `grocery/prices` endpoint.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopsmart_core::{ProviderSettings, SearchFilters, Store};

/// Request body for `POST {base}/grocery/prices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRequest {
    pub query: String,
    /// Lower-case provider store identifiers.
    pub stores: Vec<String>,
    pub location: String,
    pub max_results: u32,
    pub include_promotions: bool,
    pub include_nutrition: bool,
}

impl PriceRequest {
    /// Builds the request for one search.
    ///
    /// With no store filter every known chain is requested. The location is
    /// the suburb filter when set, otherwise the configured default.
    #[must_use]
    pub fn for_search(query: &str, filters: &SearchFilters, settings: &ProviderSettings) -> Self {
        let stores = if filters.stores.is_empty() {
            Store::KNOWN.iter().map(Store::provider_id).collect()
        } else {
            filters.stores.iter().map(Store::provider_id).collect()
        };
        let location = filters
            .suburb_filter()
            .unwrap_or(&settings.default_location)
            .to_owned();

        Self {
            query: query.to_owned(),
            stores,
            location,
            max_results: settings.max_results,
            include_promotions: settings.include_promotions,
            include_nutrition: settings.include_nutrition,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceResponse {
    #[serde(default)]
    pub products: Vec<ProviderProduct>,
}

/// One product price as the provider reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProduct {
    pub id: String,
    pub name: String,
    /// Provider store identifier, e.g. `"coles"`.
    pub store: String,
    pub price: Decimal,
    pub unit_price: Decimal,
    pub unit: String,
    pub location: String,
    pub suburb: String,
    pub last_updated: DateTime<Utc>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub dietary_info: Option<String>,
    pub brand: Option<String>,
    pub size: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ProviderSettings {
        ProviderSettings {
            api_key: Some("key".to_owned()),
            base_url: "https://api.example.com/v1".to_owned(),
            request_timeout_secs: 10,
            deadline_ms: 8_000,
            max_results: 25,
            default_location: "Sydney, NSW".to_owned(),
            include_promotions: true,
            include_nutrition: false,
            max_retries: 1,
            retry_backoff_base_ms: 250,
            user_agent: "test".to_owned(),
        }
    }

    #[test]
    fn request_without_filters_asks_for_every_store() {
        let request = PriceRequest::for_search("milk", &SearchFilters::default(), &settings());
        assert_eq!(
            request.stores,
            ["woolworths", "coles", "iga", "aldi", "costco"]
        );
        assert_eq!(request.location, "Sydney, NSW");
        assert_eq!(request.max_results, 25);
    }

    #[test]
    fn request_uses_filter_stores_and_suburb() {
        let filters = SearchFilters {
            suburb: Some("Paddington".to_owned()),
            ..SearchFilters::with_stores([Store::Iga])
        };
        let request = PriceRequest::for_search("bread", &filters, &settings());
        assert_eq!(request.stores, ["iga"]);
        assert_eq!(request.location, "Paddington");
    }

    #[test]
    fn request_serializes_camel_case() {
        let request = PriceRequest::for_search("milk", &SearchFilters::default(), &settings());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["maxResults"], 25);
        assert_eq!(json["includePromotions"], true);
        assert_eq!(json["includeNutrition"], false);
    }

    #[test]
    fn product_parses_numeric_prices_and_optional_fields() {
        let json = serde_json::json!({
            "id": "p1",
            "name": "Milk 1L",
            "store": "coles",
            "price": 2.3,
            "unitPrice": 2.3,
            "unit": "per litre",
            "location": "456 Pitt St, Sydney NSW 2000",
            "suburb": "Sydney CBD",
            "lastUpdated": "2024-01-15T09:45:00Z",
            "brand": "Coles"
        });
        let product: ProviderProduct = serde_json::from_value(json).unwrap();
        assert_eq!(product.price, Decimal::new(230, 2));
        assert_eq!(product.brand.as_deref(), Some("Coles"));
        assert!(product.latitude.is_none());
    }
}
