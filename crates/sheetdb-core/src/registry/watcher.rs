//! Data directory watcher.
//!
//! Watches the data directory (non-recursively) and invokes a callback after
//! database files or their sidecars are added, modified, or removed. The
//! callback is expected to load a fresh registry and publish it.

use crate::config::RegistryConfig;
use crate::{Result, SheetdbError};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, Debouncer};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Callback invoked after a debounced batch of relevant changes.
pub type ChangeCallback = Box<dyn Fn() + Send + 'static>;

/// Watches a data directory until dropped.
pub struct DatasetWatcher {
    _debouncer: Debouncer<RecommendedWatcher>,
}

impl DatasetWatcher {
    /// Start watching `dir`.
    ///
    /// Dropping the watcher closes the event channel, which ends the
    /// background thread.
    pub fn new(dir: impl AsRef<Path>, debounce: Duration, on_change: ChangeCallback) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let (event_tx, event_rx) = std::sync::mpsc::channel();

        let mut debouncer = new_debouncer(debounce, event_tx).map_err(|e| SheetdbError::Config {
            message: format!("Failed to create file watcher: {}", e),
        })?;
        debouncer
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| SheetdbError::Config {
                message: format!("Failed to watch {}: {}", dir.display(), e),
            })?;

        info!("Watching {} for dataset changes", dir.display());

        std::thread::spawn(move || {
            for result in event_rx {
                match result {
                    Ok(events) => {
                        if events.iter().any(|event| is_relevant_change(&event.path)) {
                            debug!("Detected dataset changes");
                            on_change();
                        }
                    }
                    Err(e) => warn!("File watcher error: {}", e),
                }
            }
            debug!("File watcher stopped");
        });

        Ok(Self {
            _debouncer: debouncer,
        })
    }
}

/// Database files and their sidecars are the only files that affect the registry.
fn is_relevant_change(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    [
        RegistryConfig::DB_EXTENSION,
        RegistryConfig::METADATA_EXTENSION,
        RegistryConfig::DESCRIPTION_EXTENSION,
    ]
    .contains(&ext)
}
