//! URL construction for dataset requests.

use sheetdb_core::filter::format_query_string;
use sheetdb_core::{DatasetInfo, FilterQuery, Result};

/// Resolve a dataset endpoint against the API base.
///
/// Absolute endpoints (`http...`) are returned unchanged; relative ones such as
/// `/census` are appended to the base.
pub fn qualify_endpoint(api_endpoint: &str, endpoint: &str) -> String {
    if endpoint.starts_with("http") {
        return endpoint.to_string();
    }
    format!("{}{}", api_endpoint.trim_end_matches('/'), endpoint)
}

/// `<qualified endpoint>/<schema>/<table><query>`.
pub fn dataset_request_url(
    api_endpoint: &str,
    dataset_endpoint: &str,
    schema: &str,
    table: &str,
    query: &str,
) -> String {
    format!(
        "{}/{}/{}{}",
        qualify_endpoint(api_endpoint, dataset_endpoint),
        schema,
        table,
        query
    )
}

/// A table picked for import.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSelection {
    pub dataset: DatasetInfo,
    pub schema: String,
    pub table: String,
    /// Set when the dataset has a single table and nothing had to be chosen.
    pub auto_selected: bool,
}

impl TableSelection {
    pub fn new(dataset: DatasetInfo, schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            dataset,
            schema: schema.into(),
            table: table.into(),
            auto_selected: false,
        }
    }

    /// Request URL for this table with the given column selection and filter.
    pub fn request_url(&self, api_endpoint: &str, query: &FilterQuery) -> Result<String> {
        Ok(dataset_request_url(
            api_endpoint,
            &self.dataset.endpoint,
            &self.schema,
            &self.table,
            &format_query_string(query)?,
        ))
    }

    /// Display name of the data source: the dataset name, plus the table when
    /// the user had to pick one.
    pub fn datasource_name(&self) -> String {
        if self.auto_selected {
            self.dataset.name.clone()
        } else {
            format!("{} - {}", self.dataset.name, self.table)
        }
    }
}
