//! HTTP request handlers.

use crate::server::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use sheetdb_core::{DatasetInfo, SheetdbError};
use std::sync::Arc;
use tracing::{debug, error};

/// Error returned by handlers, rendered as `{"message": ...}`.
#[derive(Debug)]
pub struct ApiError(SheetdbError);

impl From<SheetdbError> for ApiError {
    fn from(err: SheetdbError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() && !self.0.is_not_ready() {
            error!("Request failed: {}", self.0);
        } else {
            debug!("Request rejected ({}): {}", status, self.0);
        }

        (status, Json(json!({ "message": self.0.to_string() }))).into_response()
    }
}

/// Query parameters of the listing route.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: Option<String>,
}

/// Reject every request with 503 until the catalog has been published.
pub async fn require_ready(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.catalog.is_ready() {
        return ApiError(SheetdbError::NotReady).into_response();
    }
    next.run(request).await
}

/// `GET /` - list datasets, or rank them against `?search=`.
///
/// A query string that does not parse is a 400 with the usual JSON body.
pub async fn handle_list(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<DatasetInfo>>, ApiError> {
    let Query(params) = params.map_err(|rejection| SheetdbError::InvalidRequest {
        message: rejection.body_text(),
    })?;
    let query = params.search.unwrap_or_default();
    Ok(Json(state.catalog.search(&query)?))
}

/// `GET /up` - health check.
pub async fn handle_up() -> &'static str {
    "OK"
}

/// `GET /:db` - a single dataset.
pub async fn handle_dataset(
    State(state): State<Arc<AppState>>,
    Path(db): Path<String>,
) -> Result<Json<DatasetInfo>, ApiError> {
    Ok(Json(state.catalog.get(&db)?))
}

/// Fallback for unknown routes.
pub async fn handle_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" })))
}
