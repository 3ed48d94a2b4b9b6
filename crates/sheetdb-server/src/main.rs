//! SheetDB Server - HTTP API over a directory of SQLite datasets.
//!
//! Lists the datasets found in `--db-path`, ranks them against free-text
//! searches, and describes individual datasets. Configuration comes from
//! flags, environment variables, or a `.env` file.

mod handler;
mod server;

use anyhow::{bail, Result};
use clap::Parser;
use server::AppState;
use sheetdb_core::config::{RegistryConfig, SearchConfig, ServerConfig};
use sheetdb_core::registry::DatasetWatcher;
use sheetdb_core::{CatalogService, SearchOptions};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "sheetdb-server")]
#[command(about = "HTTP API over a directory of SQLite datasets")]
struct Args {
    /// Directory holding the `*.db` files and their sidecars
    #[arg(long, env = "DB_PATH")]
    db_path: PathBuf,

    /// Host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = ServerConfig::DEFAULT_HOST)]
    host: String,

    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, env = "SERVER_PORT", default_value_t = ServerConfig::DEFAULT_PORT)]
    port: u16,

    /// Largest per-field fuzzy score accepted by search (0 = exact substrings only)
    #[arg(long, env = "SEARCH_THRESHOLD", default_value_t = SearchConfig::DEFAULT_THRESHOLD)]
    search_threshold: f64,

    /// Reload the registry when files in the data directory change
    #[arg(long)]
    watch: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("Starting SheetDB server");

    if !args.db_path.is_dir() {
        bail!(
            "The database directory does not exist: {}",
            args.db_path.display()
        );
    }

    let options = SearchOptions::default().with_threshold(args.search_threshold);
    options.validate()?;

    let state = Arc::new(AppState {
        catalog: Arc::new(CatalogService::new(options)),
        data_dir: args.db_path.clone(),
    });

    // Bind first; requests are answered with 503 until the registry is published.
    let addr = server::start_server(Arc::clone(&state), &args.host, args.port).await?;

    // Intentional stdout line so supervisors and tests can find the port.
    println!("SERVER_PORT={}", addr.port());

    let loader = Arc::clone(&state);
    tokio::task::spawn_blocking(move || loader.catalog.load_dir(&loader.data_dir)).await??;

    info!("Server is running on http://{}", addr);

    let _watcher = if args.watch {
        let reloader = Arc::clone(&state);
        Some(DatasetWatcher::new(
            &state.data_dir,
            RegistryConfig::WATCH_DEBOUNCE,
            Box::new(move || {
                if let Err(e) = reloader.catalog.load_dir(&reloader.data_dir) {
                    error!("Failed to reload registry: {}", e);
                }
            }),
        )?)
    } else {
        None
    };

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, exiting");

    Ok(())
}
