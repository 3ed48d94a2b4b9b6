//! Registry entry types.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Descriptive metadata for a dataset. Absent sidecar fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetMetadata {
    pub title: String,
    pub description: String,
    pub publisher: String,
}

impl DatasetMetadata {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        publisher: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            publisher: publisher.into(),
        }
    }

    /// Metadata carrying only a description, as produced by a `.txt` sidecar.
    pub fn from_description(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }
}

/// One dataset (a database file) known to the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    pub name: String,
    pub metadata: DatasetMetadata,
    /// Location of the database file; never sent to clients.
    pub path: PathBuf,
}

impl RegistryEntry {
    pub fn new(name: impl Into<String>, metadata: DatasetMetadata, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            metadata,
            path: path.into(),
        }
    }

    /// API path under which this dataset is served.
    pub fn endpoint(&self) -> String {
        format!("/{}", self.name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Public view returned by the listing and search routes.
    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            name: self.name.clone(),
            metadata: self.metadata.clone(),
            endpoint: self.endpoint(),
        }
    }
}

/// Wire representation of a dataset: `{ name, metadata, endpoint }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub name: String,
    #[serde(default)]
    pub metadata: DatasetMetadata,
    pub endpoint: String,
}
