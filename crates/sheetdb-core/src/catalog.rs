//! Published dataset catalog.
//!
//! A [`Catalog`] pairs a registry snapshot with the search index built from
//! it. [`CatalogService`] owns the current catalog: it starts empty, and every
//! load builds a complete new catalog before swapping it in, so readers only
//! ever see a finished index.

use crate::registry::{DatasetInfo, DatasetRegistry, RegistryEntry};
use crate::search::{SearchIndex, SearchOptions};
use crate::{Result, SheetdbError};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// Registry snapshot plus its search index.
pub struct Catalog {
    registry: DatasetRegistry,
    index: SearchIndex,
}

impl Catalog {
    pub fn build(registry: DatasetRegistry, options: SearchOptions) -> Result<Self> {
        let index = SearchIndex::build(&registry, options)?;
        Ok(Self { registry, index })
    }

    pub fn registry(&self) -> &DatasetRegistry {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn get(&self, name: &str) -> Result<&RegistryEntry> {
        self.registry
            .get(name)
            .ok_or_else(|| SheetdbError::DatasetNotFound {
                name: name.to_string(),
            })
    }

    /// Entries matching `query`, best first. A blank query lists everything.
    pub fn search(&self, query: &str) -> Vec<&RegistryEntry> {
        self.search_scored(query)
            .into_iter()
            .map(|(entry, _)| entry)
            .collect()
    }

    /// Like [`Catalog::search`] but keeps the aggregate score (lower is better).
    pub fn search_scored(&self, query: &str) -> Vec<(&RegistryEntry, f64)> {
        let entries = self.registry.entries();
        self.index
            .search(query)
            .into_iter()
            .map(|hit| (&entries[hit.position], hit.score))
            .collect()
    }
}

/// Owner of the current catalog.
///
/// Queries before the first [`CatalogService::publish`] fail with
/// [`SheetdbError::NotReady`].
pub struct CatalogService {
    current: RwLock<Option<Arc<Catalog>>>,
    options: SearchOptions,
}

impl CatalogService {
    pub fn new(options: SearchOptions) -> Self {
        Self {
            current: RwLock::new(None),
            options,
        }
    }

    /// Build a catalog for `registry` and make it current.
    pub fn publish(&self, registry: DatasetRegistry) -> Result<Arc<Catalog>> {
        let catalog = Arc::new(Catalog::build(registry, self.options.clone())?);
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&catalog));
        info!("Published catalog with {} datasets", catalog.len());
        Ok(catalog)
    }

    /// Load the registry from `dir` and publish it. Returns the dataset count.
    pub fn load_dir(&self, dir: &Path) -> Result<usize> {
        let registry = DatasetRegistry::load(dir)?;
        Ok(self.publish(registry)?.len())
    }

    pub fn is_ready(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The current catalog, or `NotReady` if nothing has been published.
    pub fn current(&self) -> Result<Arc<Catalog>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(SheetdbError::NotReady)
    }

    pub fn search(&self, query: &str) -> Result<Vec<DatasetInfo>> {
        let catalog = self.current()?;
        let results: Vec<DatasetInfo> = catalog
            .search(query)
            .into_iter()
            .map(RegistryEntry::info)
            .collect();
        debug!("Search '{}' matched {} datasets", query, results.len());
        Ok(results)
    }

    pub fn get(&self, name: &str) -> Result<DatasetInfo> {
        let catalog = self.current()?;
        Ok(catalog.get(name)?.info())
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new(SearchOptions::default())
    }
}
