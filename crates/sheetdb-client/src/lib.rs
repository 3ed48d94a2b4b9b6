//! SheetDB Client - browse, filter and import datasets from a SheetDB server.
//!
//! The spreadsheet add-in flow maps onto this crate as follows:
//! 1. [`DatasetClient::search`] / [`DatasetClient::list_datasets`] to pick a dataset
//! 2. [`DatasetClient::fetch_schema`] (or [`DatasetClient::auto_select_table`]) to pick a table
//! 3. build a [`sheetdb_core::FilterQuery`] from the table's [`schema::FieldSpec`]s
//! 4. [`DatasetClient::import`] to fetch rows as an [`ImportTable`]

pub mod client;
pub mod endpoint;
pub mod import;
pub mod schema;

pub use client::DatasetClient;
pub use endpoint::{dataset_request_url, qualify_endpoint, TableSelection};
pub use import::{column_letter, sanitize_table_name, ImportTable};
pub use schema::{ColumnInfo, DatabaseSchema, FieldSpec, FieldType, SchemaInfo, TableInfo};
