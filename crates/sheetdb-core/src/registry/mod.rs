//! Dataset registry.
//!
//! A dataset is a SQLite file `<name>.db` in the data directory, optionally
//! described by a sidecar:
//! - `<name>.json` with `title`, `description` and `publisher`
//! - `<name>.txt` whose content is used as the description
//!
//! The registry is loaded once and never mutated; a changed directory means a
//! new registry. [`DatasetWatcher`] reports such changes.

mod dataset_registry;
mod entry;
mod watcher;

pub use dataset_registry::DatasetRegistry;
pub use entry::{DatasetInfo, DatasetMetadata, RegistryEntry};
pub use watcher::{ChangeCallback, DatasetWatcher};
