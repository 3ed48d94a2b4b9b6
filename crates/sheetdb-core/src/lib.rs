//! SheetDB Core - dataset registry, fuzzy search and filter formatting.
//!
//! This crate has no HTTP layer. It provides:
//! - [`DatasetRegistry`]: datasets discovered from a directory of SQLite files
//! - [`SearchIndex`]: weighted fuzzy search over dataset metadata
//! - [`CatalogService`]: owner of the published registry + index
//! - [`filter`]: filter trees and the query string formatter used by clients
//!
//! # Example
//!
//! ```rust,ignore
//! use sheetdb_core::{CatalogService, SearchOptions};
//!
//! let service = CatalogService::new(SearchOptions::default());
//! service.load_dir("/data".as_ref())?;
//!
//! for dataset in service.search("census")? {
//!     println!("{} -> {}", dataset.metadata.title, dataset.endpoint);
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod registry;
pub mod search;

pub use catalog::{Catalog, CatalogService};
pub use error::{Result, SheetdbError};
pub use filter::{format_query_string, FilterQuery, Group, Rule};
pub use registry::{DatasetInfo, DatasetMetadata, DatasetRegistry, RegistryEntry};
pub use search::{SearchIndex, SearchOptions};
