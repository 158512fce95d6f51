//! HTTP client for the grocery pricing API.
//!
//! One endpoint: `POST {base}/grocery/prices` with a bearer credential and a
//! JSON [`PriceRequest`]. 429 and transport failures are retried with
//! back-off; any other non-2xx status is returned as a typed error.

use std::time::Duration;

use reqwest::{Client, Url};
use shopsmart_core::ProviderSettings;

use crate::error::ProviderError;
use crate::retry::retry_with_backoff;
use crate::types::{PriceRequest, PriceResponse, ProviderProduct};

const PRICES_PATH: &str = "grocery/prices";
/// Used when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Client for the pricing provider.
///
/// Use [`PricingClient::new`] for the configured base URL or
/// [`PricingClient::with_base_url`] to point at a mock server in tests.
pub struct PricingClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl PricingClient {
    /// Creates a client against `settings.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ProviderError::InvalidBaseUrl`] if the base URL is invalid.
    pub fn new(api_key: &str, settings: &ProviderSettings) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, settings, &settings.base_url)
    }

    /// Creates a client against an explicit base URL.
    ///
    /// # Errors
    ///
    /// Same as [`PricingClient::new`].
    pub fn with_base_url(
        api_key: &str,
        settings: &ProviderSettings,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(&settings.user_agent)
            .build()?;

        // Exactly one trailing slash, so joining keeps any path prefix like `/v1`.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(PRICES_PATH))
            .map_err(|e| ProviderError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
            max_retries: settings.max_retries,
            backoff_base_ms: settings.retry_backoff_base_ms,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches prices for one search, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::RateLimited`]: HTTP 429 after all retries.
    /// - [`ProviderError::UnexpectedStatus`]: any other non-2xx status (not retried).
    /// - [`ProviderError::Http`]: network or TLS failure after all retries.
    /// - [`ProviderError::Deserialize`]: the body is not the expected JSON.
    pub async fn fetch_prices(
        &self,
        request: &PriceRequest,
    ) -> Result<Vec<ProviderProduct>, ProviderError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self
                .client
                .post(self.endpoint.clone())
                .bearer_auth(&self.api_key)
                .json(request)
                .send()
                .await?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                return Err(ProviderError::RateLimited { retry_after_secs });
            }

            if !status.is_success() {
                return Err(ProviderError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: self.endpoint.to_string(),
                });
            }

            let body = response.text().await?;
            let parsed = serde_json::from_str::<PriceResponse>(&body).map_err(|e| {
                ProviderError::Deserialize {
                    context: format!("prices for query {:?}", request.query),
                    source: e,
                }
            })?;

            tracing::debug!(
                query = %request.query,
                products = parsed.products.len(),
                "pricing provider responded"
            );
            Ok(parsed.products)
        })
        .await
    }
}
