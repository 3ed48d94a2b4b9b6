//! In-memory dataset registry loaded from a directory of SQLite files.

use super::entry::{DatasetMetadata, RegistryEntry};
use crate::config::RegistryConfig;
use crate::{Result, SheetdbError};
use rusqlite::{Connection, OpenFlags};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Immutable set of datasets keyed by name.
///
/// Entries are kept sorted by name; `get` goes through a name index so lookups
/// do not scan the entry list.
#[derive(Debug, Clone, Default)]
pub struct DatasetRegistry {
    entries: Vec<RegistryEntry>,
    by_name: HashMap<String, usize>,
}

/// Sidecar JSON layout. Every field is optional.
#[derive(Debug, Default, Deserialize)]
struct SidecarFile {
    title: Option<String>,
    description: Option<String>,
    publisher: Option<String>,
}

impl DatasetRegistry {
    /// Build a registry from already-loaded entries.
    ///
    /// Entries are sorted by name. When two entries share a name the first one
    /// wins and the duplicate is dropped with a warning.
    pub fn new(entries: impl IntoIterator<Item = RegistryEntry>) -> Self {
        let mut sorted: Vec<RegistryEntry> = entries.into_iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let mut registry = Self::default();
        for entry in sorted {
            if registry.by_name.contains_key(&entry.name) {
                warn!("Duplicate dataset name {}, ignoring {}", entry.name, entry.path.display());
                continue;
            }
            registry
                .by_name
                .insert(entry.name.clone(), registry.entries.len());
            registry.entries.push(entry);
        }
        registry
    }

    /// Scan `dir` for `*.db` files and load each one with its sidecar metadata.
    ///
    /// Files that cannot be opened as SQLite databases are skipped with a warning.
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(SheetdbError::NotADirectory(dir.to_path_buf()));
        }

        info!("Initializing database registry from {}", dir.display());

        let read_dir = std::fs::read_dir(dir).map_err(|e| SheetdbError::io_with_path(e, dir))?;
        let mut entries = Vec::new();
        for item in read_dir {
            let path = item.map_err(|e| SheetdbError::io_with_path(e, dir))?.path();
            if !path.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(RegistryConfig::DB_EXTENSION)
            {
                continue;
            }

            match load_entry(&path) {
                Ok(entry) => {
                    debug!("Loaded dataset {} from {}", entry.name, path.display());
                    entries.push(entry);
                }
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        let registry = Self::new(entries);
        info!(
            "Initialized database registry with {} entries",
            registry.len()
        );
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// All entries in registry order (sorted by name).
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn load_entry(path: &Path) -> Result<RegistryEntry> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SheetdbError::Config {
            message: format!("Unusable database file name: {}", path.display()),
        })?
        .to_string();

    probe_database(path)?;
    let metadata = load_metadata(path);

    Ok(RegistryEntry::new(name, metadata, path))
}

/// Open the file read-only and read its schema version, which fails for
/// anything that is not a SQLite database.
fn probe_database(path: &Path) -> Result<()> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.busy_timeout(Duration::from_millis(u64::from(
        RegistryConfig::BUSY_TIMEOUT_MS,
    )))?;
    conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))?;
    Ok(())
}

/// Read the sidecar next to a database file.
///
/// `<name>.json` takes precedence over `<name>.txt`. Unreadable or malformed
/// sidecars are logged and treated as absent.
fn load_metadata(db_path: &Path) -> DatasetMetadata {
    let json_path = db_path.with_extension(RegistryConfig::METADATA_EXTENSION);
    if json_path.is_file() {
        match std::fs::read_to_string(&json_path)
            .map_err(|e| SheetdbError::io_with_path(e, &json_path))
            .and_then(|content| Ok(serde_json::from_str::<SidecarFile>(&content)?))
        {
            Ok(sidecar) => {
                return DatasetMetadata::new(
                    sidecar.title.unwrap_or_default(),
                    sidecar.description.unwrap_or_default(),
                    sidecar.publisher.unwrap_or_default(),
                );
            }
            Err(e) => warn!("Ignoring metadata sidecar {}: {}", json_path.display(), e),
        }
    }

    let txt_path = db_path.with_extension(RegistryConfig::DESCRIPTION_EXTENSION);
    if txt_path.is_file() {
        match std::fs::read_to_string(&txt_path) {
            Ok(content) => return DatasetMetadata::from_description(content.trim()),
            Err(e) => warn!("Ignoring description file {}: {}", txt_path.display(), e),
        }
    }

    DatasetMetadata::default()
}
