//! Stateless search, suggestion and popular-item endpoints.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use shopsmart_core::{GeoPoint, ProductPriceRecord, SearchFilters, SortBy, SortOrder, Store};
use shopsmart_search::{Catalog, Suggestions};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchQuery {
    pub q: Option<String>,
    pub suburb: Option<String>,
    /// Comma-separated store display names.
    pub stores: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub max_distance_km: Option<f64>,
}

impl SearchQuery {
    fn to_filters(&self) -> Result<SearchFilters, String> {
        let stores = self
            .stores
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(Store::from_display_name)
                    .collect()
            })
            .unwrap_or_default();

        let sort_by = self
            .sort_by
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::parse::<SortBy>)
            .transpose()?;
        let sort_order = self
            .sort_order
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::parse::<SortOrder>)
            .transpose()?;

        let origin = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            (None, None) => None,
            _ => return Err("lat and lng must be given together".to_owned()),
        };

        let filters = SearchFilters {
            suburb: self.suburb.clone(),
            stores,
            sort_by,
            sort_order,
            origin,
            max_distance_km: self.max_distance_km,
        };
        validate_filters(&filters)?;
        Ok(filters)
    }
}

/// Rejects coordinates and distances no search could honour.
pub(super) fn validate_filters(filters: &SearchFilters) -> Result<(), String> {
    if let Some(origin) = filters.origin {
        if !(-90.0..=90.0).contains(&origin.lat) || !(-180.0..=180.0).contains(&origin.lng) {
            return Err(format!(
                "origin ({}, {}) is not a valid coordinate",
                origin.lat, origin.lng
            ));
        }
    }
    if let Some(km) = filters.max_distance_km {
        if !km.is_finite() || km < 0.0 {
            return Err("max_distance_km must be a non-negative number".to_owned());
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub(super) struct SearchResults {
    query: String,
    filters: SearchFilters,
    result_count: usize,
    results: Vec<ProductPriceRecord>,
}

pub(super) async fn search_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<SearchResults>>, ApiError> {
    let filters = query
        .to_filters()
        .map_err(|msg| ApiError::validation(req_id.0.clone(), msg))?;
    let text = query.q.as_deref().map(str::trim).unwrap_or_default().to_owned();

    let results = state.catalog.query(&text, &filters).await.map_err(|e| {
        tracing::error!(error = %e, query = %text, "catalog search failed");
        ApiError::new(req_id.0.clone(), "internal_error", "search failed")
    })?;

    Ok(Json(ApiResponse::new(
        req_id.0,
        SearchResults {
            query: text,
            filters,
            result_count: results.len(),
            results,
        },
    )))
}

#[derive(Debug, Deserialize)]
pub(super) struct SuggestionsQuery {
    pub q: Option<String>,
}

pub(super) async fn list_suggestions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SuggestionsQuery>,
) -> Json<ApiResponse<Suggestions>> {
    let suggestions = state
        .suggestions
        .suggest(query.q.as_deref().unwrap_or_default());
    Json(ApiResponse::new(req_id.0, suggestions))
}

pub(super) async fn list_popular(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<String>>> {
    Json(ApiResponse::new(
        req_id.0,
        state.suggestions.popular_chips().to_vec(),
    ))
}
