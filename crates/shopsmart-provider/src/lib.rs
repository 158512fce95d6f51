//! Client for the external grocery pricing API, and a [`Catalog`] that
//! searches through it with the bundled catalog as fallback.
//!
//! [`Catalog`]: shopsmart_search::Catalog

pub mod catalog;
pub mod client;
pub mod error;
pub mod normalize;
mod retry;
pub mod types;

pub use catalog::ProviderCatalog;
pub use client::PricingClient;
pub use error::ProviderError;
pub use normalize::{normalize_product, normalize_store_id};
pub use types::{PriceRequest, PriceResponse, ProviderProduct};
