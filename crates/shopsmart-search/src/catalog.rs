//! Injectable sources of product price records.

use std::collections::HashSet;
use std::future::Future;

use rust_decimal::Decimal;
use serde::Deserialize;
use shopsmart_core::{ProductPriceRecord, SearchFilters};

use crate::engine;
use crate::error::CatalogError;

const MOCK_CATALOG_YAML: &str = include_str!("../data/mock_catalog.yaml");

/// A data source the interaction controller can search.
///
/// Implemented by [`StaticCatalog`] for in-memory data and by the
/// provider-backed catalog for live prices.
pub trait Catalog: Send + Sync {
    /// Every record the catalog can serve without a query.
    fn load(&self) -> impl Future<Output = Result<Vec<ProductPriceRecord>, CatalogError>> + Send;

    /// Matching records for `query`, filtered and ordered per `filters`.
    fn query(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> impl Future<Output = Result<Vec<ProductPriceRecord>, CatalogError>> + Send;

    /// Fixed list of frequently searched items used for autosuggest.
    fn popular_items(&self) -> impl Future<Output = Result<Vec<String>, CatalogError>> + Send;
}

/// On-disk shape of a catalog fixture.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub popular_items: Vec<String>,
    pub records: Vec<ProductPriceRecord>,
}

/// An immutable in-memory catalog.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    records: Vec<ProductPriceRecord>,
    popular_items: Vec<String>,
}

impl StaticCatalog {
    /// Builds a catalog after checking ids are unique and prices non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] on a duplicate id, a blank id or
    /// name, or a negative price.
    pub fn new(
        records: Vec<ProductPriceRecord>,
        popular_items: Vec<String>,
    ) -> Result<Self, CatalogError> {
        validate_records(&records)?;
        Ok(Self {
            records,
            popular_items,
        })
    }

    /// Parses and validates a YAML catalog fixture.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed YAML and
    /// [`CatalogError::Validation`] for invalid records.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::new(file.records, file.popular_items)
    }

    /// The bundled sample catalog of Sydney supermarket prices.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded fixture is itself broken.
    pub fn mock() -> Result<Self, CatalogError> {
        Self::from_yaml_str(MOCK_CATALOG_YAML)
    }

    #[must_use]
    pub fn records(&self) -> &[ProductPriceRecord] {
        &self.records
    }

    #[must_use]
    pub fn popular(&self) -> &[String] {
        &self.popular_items
    }

    /// Synchronous search over the held records.
    #[must_use]
    pub fn search(&self, query: &str, filters: &SearchFilters) -> Vec<ProductPriceRecord> {
        engine::search(query, filters, &self.records)
    }
}

impl Catalog for StaticCatalog {
    async fn load(&self) -> Result<Vec<ProductPriceRecord>, CatalogError> {
        Ok(self.records.clone())
    }

    async fn query(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<ProductPriceRecord>, CatalogError> {
        Ok(self.search(query, filters))
    }

    async fn popular_items(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.popular_items.clone())
    }
}

fn validate_records(records: &[ProductPriceRecord]) -> Result<(), CatalogError> {
    let mut seen_ids = HashSet::new();

    for record in records {
        if record.id.trim().is_empty() {
            return Err(CatalogError::Validation(
                "record id must be non-empty".to_string(),
            ));
        }

        if record.name.trim().is_empty() {
            return Err(CatalogError::Validation(format!(
                "record '{}' has an empty name",
                record.id
            )));
        }

        if record.price < Decimal::ZERO || record.unit_price < Decimal::ZERO {
            return Err(CatalogError::Validation(format!(
                "record '{}' has a negative price",
                record.id
            )));
        }

        if !seen_ids.insert(record.id.as_str()) {
            return Err(CatalogError::Validation(format!(
                "duplicate record id: '{}'",
                record.id
            )));
        }
    }

    Ok(())
}
