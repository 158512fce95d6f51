//! Interaction controller: owns the current query, filters, loading flag and
//! result set, and coordinates asynchronous catalog searches.
//!
//! Every dispatched search takes a request token from a monotonically
//! increasing counter. A response is applied only if its token is still the
//! latest issued; anything older is dropped. This keeps a slow early search
//! from overwriting the results of a faster later one.
//!
//! The catalog call and the apply step run on a spawned task. A caller that
//! stops waiting (a dropped HTTP request, a timeout) does not leave the
//! session stuck in `Loading`; the response is still applied or discarded.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use shopsmart_core::{ProductPriceRecord, SearchFilters, Store};
use tokio::sync::Mutex;

use crate::catalog::Catalog;
use crate::sort::{TableColumn, TableSort};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Idle,
    Loading,
    Populated,
}

#[derive(Debug, Default)]
struct ControllerState {
    query: String,
    filters: SearchFilters,
    results: Vec<ProductPriceRecord>,
    phase: Phase,
    table_sort: TableSort,
    latest_request: u64,
}

impl ControllerState {
    fn begin_request(&mut self) -> u64 {
        self.latest_request += 1;
        self.phase = Phase::Loading;
        self.latest_request
    }
}

/// What became of one search dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The response was the latest and is now the result set.
    Applied { result_count: usize },
    /// A newer request (or a reset) was issued first; the response was dropped.
    Superseded,
    /// Nothing to search for; no request was made.
    Skipped,
}

/// What the result area should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultView {
    /// Nothing searched yet.
    Idle,
    Loading,
    /// A query ran and matched nothing.
    NoResults,
    Results,
}

/// Choices the filter popover offers, derived from the current results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub suburbs: Vec<String>,
    pub stores: Vec<Store>,
}

impl FilterOptions {
    #[must_use]
    pub fn from_results(results: &[ProductPriceRecord]) -> Self {
        let suburbs: BTreeSet<&str> = results.iter().map(|r| r.suburb.as_str()).collect();
        let stores: BTreeSet<&str> = results.iter().map(|r| r.store.display_name()).collect();
        Self {
            suburbs: suburbs.into_iter().map(str::to_owned).collect(),
            stores: stores.into_iter().map(Store::from_display_name).collect(),
        }
    }
}

/// Point-in-time copy of the controller state, ready to render.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub query: String,
    pub filters: SearchFilters,
    pub active_filter_count: usize,
    pub is_loading: bool,
    pub view: ResultView,
    pub result_count: usize,
    /// Results in table order.
    pub rows: Vec<ProductPriceRecord>,
    pub table_sort: TableSort,
    /// Id of the highlighted cheapest row, when the table is sorted by price.
    pub best_price_id: Option<String>,
    pub filter_options: FilterOptions,
}

pub struct SearchController<C> {
    catalog: Arc<C>,
    state: Arc<Mutex<ControllerState>>,
}

impl<C: Catalog + 'static> SearchController<C> {
    #[must_use]
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            state: Arc::new(Mutex::new(ControllerState::default())),
        }
    }

    /// Sets the query to `text` (trimmed) and searches with the current filters.
    pub async fn submit_search(&self, text: &str) -> SearchOutcome {
        let (token, query, filters) = {
            let mut state = self.state.lock().await;
            state.query = text.trim().to_owned();
            let token = state.begin_request();
            (token, state.query.clone(), state.filters.clone())
        };
        self.dispatch(token, query, filters).await
    }

    /// Picks an autosuggest entry: it becomes the query and is searched at once.
    pub async fn select_suggestion(&self, suggestion: &str) -> SearchOutcome {
        self.submit_search(suggestion).await
    }

    /// Replaces the filters. Re-runs the current query, if there is one.
    pub async fn update_filters(&self, filters: SearchFilters) -> SearchOutcome {
        let pending = {
            let mut state = self.state.lock().await;
            state.filters = filters;
            if state.query.is_empty() {
                None
            } else {
                let token = state.begin_request();
                Some((token, state.query.clone(), state.filters.clone()))
            }
        };

        match pending {
            Some((token, query, filters)) => self.dispatch(token, query, filters).await,
            None => {
                tracing::debug!("filters updated with no active query; not searching");
                SearchOutcome::Skipped
            }
        }
    }

    /// Back to the initial state. Any search still in flight is superseded.
    pub async fn reset_search(&self) {
        let mut state = self.state.lock().await;
        state.query.clear();
        state.results.clear();
        state.filters = SearchFilters::default();
        state.phase = Phase::Idle;
        state.latest_request += 1;
    }

    /// Click on a result-table column header.
    pub async fn toggle_table_sort(&self, column: TableColumn) -> TableSort {
        let mut state = self.state.lock().await;
        state.table_sort.toggle(column);
        state.table_sort
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        let rows = state.table_sort.apply(&state.results);
        let best_price_id = if state.table_sort.highlights_best_price() {
            rows.first().map(|r| r.id.clone())
        } else {
            None
        };

        SessionSnapshot {
            query: state.query.clone(),
            filters: state.filters.clone(),
            active_filter_count: state.filters.active_filter_count(),
            is_loading: state.phase == Phase::Loading,
            view: view_of(&state),
            result_count: rows.len(),
            filter_options: FilterOptions::from_results(&state.results),
            rows,
            table_sort: state.table_sort,
            best_price_id,
        }
    }

    async fn dispatch(&self, token: u64, query: String, filters: SearchFilters) -> SearchOutcome {
        let catalog = Arc::clone(&self.catalog);
        let state = Arc::clone(&self.state);
        let task = tokio::spawn(async move {
            let results = match catalog.query(&query, &filters).await {
                Ok(results) => results,
                Err(e) => {
                    tracing::error!(query = %query, error = %e, "search failed; showing no results");
                    Vec::new()
                }
            };
            apply_results(&state, token, &query, results).await
        });

        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(token, error = %e, "search task failed; showing no results");
                apply_results(&self.state, token, "", Vec::new()).await
            }
        }
    }
}

/// Stores `results` if `token` is still the latest request.
async fn apply_results(
    state: &Mutex<ControllerState>,
    token: u64,
    query: &str,
    results: Vec<ProductPriceRecord>,
) -> SearchOutcome {
    let mut state = state.lock().await;
    if state.latest_request != token {
        tracing::debug!(
            query,
            token,
            latest = state.latest_request,
            "discarding stale search response"
        );
        return SearchOutcome::Superseded;
    }

    let result_count = results.len();
    state.results = results;
    state.phase = Phase::Populated;
    tracing::info!(query, result_count, "search results applied");
    SearchOutcome::Applied { result_count }
}

fn view_of(state: &ControllerState) -> ResultView {
    match state.phase {
        Phase::Loading => ResultView::Loading,
        _ if !state.results.is_empty() => ResultView::Results,
        Phase::Populated if !state.query.is_empty() => ResultView::NoResults,
        _ => ResultView::Idle,
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
