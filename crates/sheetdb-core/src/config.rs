//! Centralized configuration for SheetDB.
//!
//! Constants for dataset discovery, search tuning and the HTTP server. The
//! server binary exposes the tunable ones as CLI flags / environment variables.

use std::time::Duration;

/// Dataset discovery configuration.
pub struct RegistryConfig;

impl RegistryConfig {
    /// Extension of database files picked up from the data directory.
    pub const DB_EXTENSION: &'static str = "db";
    /// Structured sidecar holding `title`, `description` and `publisher`.
    pub const METADATA_EXTENSION: &'static str = "json";
    /// Plain-text sidecar whose content becomes the description.
    pub const DESCRIPTION_EXTENSION: &'static str = "txt";
    /// Busy timeout applied when probing a database file.
    pub const BUSY_TIMEOUT_MS: u32 = 5000;
    /// Quiet period before a batch of directory changes triggers a reload.
    pub const WATCH_DEBOUNCE: Duration = Duration::from_millis(500);
}

/// Fuzzy search tuning.
pub struct SearchConfig;

impl SearchConfig {
    /// Maximum per-field score (edit distance / pattern length) accepted as a match.
    ///
    /// 0.0 only accepts exact substrings, 1.0 accepts anything.
    pub const DEFAULT_THRESHOLD: f64 = 0.4;

    pub const NAME_WEIGHT: f64 = 3.0;
    pub const TITLE_WEIGHT: f64 = 3.0;
    pub const DESCRIPTION_WEIGHT: f64 = 1.0;
    pub const PUBLISHER_WEIGHT: f64 = 2.0;
}

/// HTTP server defaults.
pub struct ServerConfig;

impl ServerConfig {
    pub const DEFAULT_HOST: &'static str = "localhost";
    pub const DEFAULT_PORT: u16 = 4000;
    /// `Access-Control-Max-Age` sent with preflight responses (30 days).
    pub const CORS_MAX_AGE_SECS: u64 = 2_592_000;
}

/// Client-side defaults used by `sheetdb-client`.
pub struct ClientConfig;

impl ClientConfig {
    /// Shorter search strings are not sent to the server.
    pub const MIN_SEARCH_CHARS: usize = 3;
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    /// Longest table name the spreadsheet accepts.
    pub const MAX_TABLE_NAME_LEN: usize = 250;
}
