//! HTTP client for the SheetDB API.

use crate::endpoint::{qualify_endpoint, TableSelection};
use crate::import::ImportTable;
use crate::schema::DatabaseSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use sheetdb_core::config::ClientConfig;
use sheetdb_core::{DatasetInfo, FilterQuery, Result, SheetdbError};
use tracing::{debug, warn};

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn network_error(err: reqwest::Error) -> SheetdbError {
    SheetdbError::Network {
        message: err.to_string(),
    }
}

/// Client for one SheetDB server.
#[derive(Debug, Clone)]
pub struct DatasetClient {
    http: reqwest::Client,
    api_endpoint: String,
}

impl DatasetClient {
    /// Create a client for the API rooted at `api_endpoint`, e.g. `http://localhost:4000`.
    pub fn new(api_endpoint: &str) -> Result<Self> {
        url::Url::parse(api_endpoint).map_err(|e| SheetdbError::Config {
            message: format!("Invalid API endpoint '{}': {}", api_endpoint, e),
        })?;

        let http = reqwest::Client::builder()
            .timeout(ClientConfig::REQUEST_TIMEOUT)
            .build()
            .map_err(network_error)?;

        Ok(Self {
            http,
            api_endpoint: api_endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    /// All datasets, in server order.
    pub async fn list_datasets(&self) -> Result<Vec<DatasetInfo>> {
        self.get_json(&format!("{}/", self.api_endpoint)).await
    }

    /// Ranked datasets matching `query`.
    ///
    /// Queries shorter than [`ClientConfig::MIN_SEARCH_CHARS`] after trimming
    /// yield no results and are not sent.
    pub async fn search(&self, query: &str) -> Result<Vec<DatasetInfo>> {
        let query = query.trim();
        if query.chars().count() < ClientConfig::MIN_SEARCH_CHARS {
            return Ok(Vec::new());
        }
        let url = format!(
            "{}/?search={}",
            self.api_endpoint,
            urlencoding::encode(query)
        );
        self.get_json(&url).await
    }

    /// Schemas, tables and columns of a dataset.
    pub async fn fetch_schema(&self, dataset: &DatasetInfo) -> Result<DatabaseSchema> {
        let url = format!(
            "{}/schema",
            qualify_endpoint(&self.api_endpoint, &dataset.endpoint)
        );
        self.get_json(&url).await
    }

    /// The table to import when the dataset leaves no choice, `None` otherwise.
    pub async fn auto_select_table(&self, dataset: &DatasetInfo) -> Result<Option<TableSelection>> {
        let schema = self.fetch_schema(dataset).await?;
        Ok(schema.sole_table().map(|(schema_info, table)| TableSelection {
            dataset: dataset.clone(),
            schema: schema_info.name.clone(),
            table: table.name.clone(),
            auto_selected: true,
        }))
    }

    /// Rows of a table request, each as a column → value object.
    pub async fn fetch_rows(&self, url: &str) -> Result<Vec<Map<String, Value>>> {
        self.get_json(url).await
    }

    /// Fetch the filtered rows of `selection` and shape them for a worksheet.
    ///
    /// With no explicit column selection, every column of the table is imported
    /// in schema order.
    pub async fn import(
        &self,
        selection: &TableSelection,
        query: &FilterQuery,
        sheet_id: &str,
    ) -> Result<ImportTable> {
        let columns = if query.select.is_empty() {
            let schema = self.fetch_schema(&selection.dataset).await?;
            schema
                .schema(&selection.schema)
                .and_then(|s| s.table(&selection.table))
                .map(|t| t.column_names())
                .ok_or_else(|| SheetdbError::DatasetNotFound {
                    name: format!("{}/{}", selection.schema, selection.table),
                })?
        } else {
            query.select.clone()
        };

        let url = selection.request_url(&self.api_endpoint, query)?;
        let rows = self.fetch_rows(&url).await?;
        debug!(
            "Fetched {} rows for {}",
            rows.len(),
            selection.datasource_name()
        );

        Ok(ImportTable::from_rows(
            sheet_id,
            &selection.datasource_name(),
            &columns,
            &rows,
        ))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);
        let response = self.http.get(url).send().await.map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string(),
            };
            warn!("GET {} failed with {}: {}", url, status, message);
            return Err(SheetdbError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(network_error)?;
        Ok(serde_json::from_str(&body)?)
    }
}
