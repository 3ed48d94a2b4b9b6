//! HTTP server implementation using Axum.

use crate::handler::{handle_dataset, handle_list, handle_not_found, handle_up, require_ready};
use axum::{http::Method, middleware, routing::get, Router};
use sheetdb_core::config::ServerConfig;
use sheetdb_core::CatalogService;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Application state shared across handlers.
pub struct AppState {
    /// Published registry and search index
    pub catalog: Arc<CatalogService>,
    /// Directory the registry is loaded from
    pub data_dir: PathBuf,
}

/// Build the router. Every route answers 503 until the catalog is published.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::OPTIONS, Method::GET])
        .max_age(Duration::from_secs(ServerConfig::CORS_MAX_AGE_SECS));

    Router::new()
        .route("/", get(handle_list))
        .route("/up", get(handle_up))
        .route("/:db", get(handle_dataset))
        .fallback(handle_not_found)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_ready,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Bind and start serving in the background.
///
/// Returns the actual address the server is bound to (useful when port=0).
pub async fn start_server(state: Arc<AppState>, host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    let actual_addr = listener.local_addr()?;

    info!("Server listening on {}", actual_addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
        }
    });

    Ok(actual_addr)
}
