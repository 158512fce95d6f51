//! Endpoints driving the interaction controller.
//!
//! Every mutation answers with the resulting snapshot so a client can render
//! straight from the response.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use shopsmart_core::SearchFilters;
use shopsmart_search::{SearchOutcome, SessionSnapshot, TableColumn, TableSort};

use crate::middleware::RequestId;

use super::search::validate_filters;
use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct SessionUpdate {
    outcome: SearchOutcome,
    session: SessionSnapshot,
}

#[derive(Debug, Deserialize)]
pub(super) struct SubmitSearchBody {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SelectSuggestionBody {
    pub suggestion: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ToggleSortBody {
    pub column: TableColumn,
}

#[derive(Debug, Serialize)]
pub(super) struct SortUpdate {
    table_sort: TableSort,
    session: SessionSnapshot,
}

pub(super) async fn get_session(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<SessionSnapshot>> {
    Json(ApiResponse::new(req_id.0, state.session.snapshot().await))
}

pub(super) async fn submit_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SubmitSearchBody>,
) -> Json<ApiResponse<SessionUpdate>> {
    let outcome = state.session.submit_search(&body.query).await;
    let session = state.session.snapshot().await;
    Json(ApiResponse::new(req_id.0, SessionUpdate { outcome, session }))
}

pub(super) async fn select_suggestion(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SelectSuggestionBody>,
) -> Json<ApiResponse<SessionUpdate>> {
    let outcome = state.session.select_suggestion(&body.suggestion).await;
    let session = state.session.snapshot().await;
    Json(ApiResponse::new(req_id.0, SessionUpdate { outcome, session }))
}

pub(super) async fn update_filters(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(filters): Json<SearchFilters>,
) -> Result<Json<ApiResponse<SessionUpdate>>, ApiError> {
    validate_filters(&filters).map_err(|msg| ApiError::validation(req_id.0.clone(), msg))?;

    let outcome = state.session.update_filters(filters).await;
    let session = state.session.snapshot().await;
    Ok(Json(ApiResponse::new(
        req_id.0,
        SessionUpdate { outcome, session },
    )))
}

pub(super) async fn toggle_sort(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ToggleSortBody>,
) -> Json<ApiResponse<SortUpdate>> {
    let table_sort = state.session.toggle_table_sort(body.column).await;
    let session = state.session.snapshot().await;
    Json(ApiResponse::new(req_id.0, SortUpdate { table_sort, session }))
}

pub(super) async fn reset_session(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<SessionSnapshot>> {
    state.session.reset_search().await;
    Json(ApiResponse::new(req_id.0, state.session.snapshot().await))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::super::test_support::{mock_app, send};

    fn row_ids(session: &serde_json::Value) -> Vec<&str> {
        session["rows"]
            .as_array()
            .expect("rows array")
            .iter()
            .map(|r| r["id"].as_str().expect("id"))
            .collect()
    }

    #[tokio::test]
    async fn fresh_session_is_idle() {
        let (status, json) = send(&mock_app().await, "GET", "/api/v1/session", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["view"], "idle");
        assert_eq!(json["data"]["is_loading"], false);
        assert_eq!(json["data"]["table_sort"]["column"], "price");
    }

    #[tokio::test]
    async fn submit_search_returns_populated_session() {
        let (status, json) = send(
            &mock_app().await,
            "POST",
            "/api/v1/session/search",
            Some(json!({ "query": "milk" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["outcome"]["status"], "applied");
        assert_eq!(json["data"]["outcome"]["result_count"], 3);

        let session = &json["data"]["session"];
        assert_eq!(session["view"], "results");
        assert_eq!(row_ids(session), ["milk-2", "milk-1", "organic-milk-1"]);
        assert_eq!(session["best_price_id"], "milk-2");
    }

    #[tokio::test]
    async fn filters_without_query_are_stored_but_not_searched() {
        let (status, json) = send(
            &mock_app().await,
            "PUT",
            "/api/v1/session/filters",
            Some(json!({ "stores": ["IGA"] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["outcome"]["status"], "skipped");
        assert_eq!(json["data"]["session"]["active_filter_count"], 1);
        assert_eq!(json["data"]["session"]["view"], "idle");
    }

    #[tokio::test]
    async fn filters_rerun_the_active_query() {
        let app = mock_app().await;
        send(
            &app,
            "POST",
            "/api/v1/session/search",
            Some(json!({ "query": "bread" })),
        )
        .await;
        let (_, json) = send(
            &app,
            "PUT",
            "/api/v1/session/filters",
            Some(json!({ "stores": ["IGA"], "sort_by": "price" })),
        )
        .await;
        assert_eq!(json["data"]["outcome"]["result_count"], 2);
        assert_eq!(
            json["data"]["session"]["filter_options"]["stores"],
            json!(["IGA"])
        );
    }

    #[tokio::test]
    async fn invalid_filters_are_rejected() {
        let (status, json) = send(
            &mock_app().await,
            "PUT",
            "/api/v1/session/filters",
            Some(json!({ "max_distance_km": -5.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn suggestion_selection_searches() {
        let (_, json) = send(
            &mock_app().await,
            "POST",
            "/api/v1/session/suggestion",
            Some(json!({ "suggestion": "Rice" })),
        )
        .await;
        assert_eq!(json["data"]["session"]["query"], "Rice");
        assert_eq!(row_ids(&json["data"]["session"]), ["rice-1"]);
    }

    #[tokio::test]
    async fn sort_toggle_flips_and_clears_highlight() {
        let app = mock_app().await;
        send(
            &app,
            "POST",
            "/api/v1/session/search",
            Some(json!({ "query": "milk" })),
        )
        .await;
        let (_, json) = send(
            &app,
            "POST",
            "/api/v1/session/sort",
            Some(json!({ "column": "price" })),
        )
        .await;
        assert_eq!(json["data"]["table_sort"]["order"], "desc");
        assert!(json["data"]["session"]["best_price_id"].is_null());
        assert_eq!(
            row_ids(&json["data"]["session"]),
            ["organic-milk-1", "milk-1", "milk-2"]
        );
    }

    #[tokio::test]
    async fn delete_resets_the_session() {
        let app = mock_app().await;
        send(
            &app,
            "POST",
            "/api/v1/session/search",
            Some(json!({ "query": "milk" })),
        )
        .await;
        let (status, json) = send(&app, "DELETE", "/api/v1/session", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["view"], "idle");
        assert_eq!(json["data"]["query"], "");
        assert_eq!(json["data"]["result_count"], 0);
    }
}
