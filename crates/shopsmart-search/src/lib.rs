//! Catalog, query engine and interaction controller for grocery price
//! comparison.

pub mod catalog;
pub mod controller;
pub mod engine;
pub mod error;
pub mod geo;
pub mod sort;
pub mod suggest;

pub use catalog::{Catalog, CatalogFile, StaticCatalog};
pub use controller::{
    FilterOptions, ResultView, SearchController, SearchOutcome, SessionSnapshot,
};
pub use engine::{refine, search};
pub use error::CatalogError;
pub use sort::{compare_records, SortKey, TableColumn, TableSort};
pub use suggest::{SuggestionFilter, Suggestions};
