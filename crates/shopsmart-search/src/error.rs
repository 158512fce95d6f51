use thiserror::Error;

/// Failures loading or querying a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("catalog validation error: {0}")]
    Validation(String),

    /// The catalog could not answer; the controller degrades to an empty list.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}
