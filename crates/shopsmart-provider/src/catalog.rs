//! A [`Catalog`] backed by the pricing provider.
//!
//! In live mode each query goes to the provider under a deadline; any
//! failure is logged and answered from the local catalog. In mock mode the
//! provider is never called.

use std::time::Duration;

use shopsmart_core::{ProductPriceRecord, ProviderMode, ProviderSettings, SearchFilters};
use shopsmart_search::{refine, Catalog, CatalogError, StaticCatalog};

use crate::client::PricingClient;
use crate::error::ProviderError;
use crate::normalize::normalize_products;
use crate::types::PriceRequest;

pub struct ProviderCatalog {
    client: Option<PricingClient>,
    fallback: StaticCatalog,
    settings: ProviderSettings,
}

impl ProviderCatalog {
    /// Pairs an optional live client with the local fallback catalog.
    #[must_use]
    pub fn new(
        client: Option<PricingClient>,
        fallback: StaticCatalog,
        settings: ProviderSettings,
    ) -> Self {
        Self {
            client,
            fallback,
            settings,
        }
    }

    /// Builds a live client when `settings` carries a usable credential.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the HTTP client cannot be built or the
    /// base URL is invalid.
    pub fn from_settings(
        settings: &ProviderSettings,
        fallback: StaticCatalog,
    ) -> Result<Self, ProviderError> {
        let client = match &settings.api_key {
            Some(key) => Some(PricingClient::new(key, settings)?),
            None => None,
        };
        Ok(Self::new(client, fallback, settings.clone()))
    }

    #[must_use]
    pub fn mode(&self) -> ProviderMode {
        if self.client.is_some() {
            ProviderMode::Live
        } else {
            ProviderMode::Mock
        }
    }

    async fn fetch_live(
        &self,
        client: &PricingClient,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<ProductPriceRecord>, ProviderError> {
        let request = PriceRequest::for_search(query, filters, &self.settings);
        let deadline_ms = self.settings.deadline_ms;
        let products = tokio::time::timeout(
            Duration::from_millis(deadline_ms),
            client.fetch_prices(&request),
        )
        .await
        .map_err(|_| ProviderError::Timeout { deadline_ms })??;

        Ok(refine(normalize_products(products), filters))
    }
}

impl Catalog for ProviderCatalog {
    async fn load(&self) -> Result<Vec<ProductPriceRecord>, CatalogError> {
        self.fallback.load().await
    }

    async fn query(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<ProductPriceRecord>, CatalogError> {
        if query.split_whitespace().next().is_none() {
            return Ok(Vec::new());
        }

        let Some(client) = &self.client else {
            return Ok(self.fallback.search(query, filters));
        };

        match self.fetch_live(client, query, filters).await {
            Ok(records) => {
                tracing::info!(query, result_count = records.len(), "live provider search");
                Ok(records)
            }
            Err(e) => {
                tracing::warn!(
                    query,
                    error = %e,
                    "pricing provider unavailable, using local catalog"
                );
                Ok(self.fallback.search(query, filters))
            }
        }
    }

    async fn popular_items(&self) -> Result<Vec<String>, CatalogError> {
        self.fallback.popular_items().await
    }
}
