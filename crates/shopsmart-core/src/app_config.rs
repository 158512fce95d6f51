use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Where search results come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderMode {
    /// Live pricing API, with the local catalog as fallback.
    Live,
    /// Local catalog only.
    Mock,
}

impl std::fmt::Display for ProviderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderMode::Live => write!(f, "live"),
            ProviderMode::Mock => write!(f, "mock"),
        }
    }
}

/// Settings for the external pricing provider client.
#[derive(Clone)]
pub struct ProviderSettings {
    /// Bearer credential. `None` when absent or a placeholder.
    pub api_key: Option<String>,
    pub base_url: String,
    pub request_timeout_secs: u64,
    /// Overall budget for one provider search, retries included.
    pub deadline_ms: u64,
    pub max_results: u32,
    /// Location sent when the search has no suburb filter.
    pub default_location: String,
    pub include_promotions: bool,
    pub include_nutrition: bool,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub user_agent: String,
}

impl ProviderSettings {
    #[must_use]
    pub fn mode(&self) -> ProviderMode {
        if self.api_key.is_some() {
            ProviderMode::Live
        } else {
            ProviderMode::Mock
        }
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("base_url", &self.base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("deadline_ms", &self.deadline_ms)
            .field("max_results", &self.max_results)
            .field("default_location", &self.default_location)
            .field("include_promotions", &self.include_promotions)
            .field("include_nutrition", &self.include_nutrition)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub provider: ProviderSettings,
}

impl AppConfig {
    #[must_use]
    pub fn provider_mode(&self) -> ProviderMode {
        self.provider.mode()
    }
}
