pub mod app_config;
pub mod config;
pub mod filters;
pub mod records;

pub use app_config::{AppConfig, Environment, ProviderMode, ProviderSettings};
pub use config::{load_app_config, load_app_config_from_env};
pub use filters::{SearchFilters, SortBy, SortOrder};
pub use records::{GeoPoint, ProductPriceRecord, Store};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
