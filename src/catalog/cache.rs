//! Explicit catalog cache with manual refresh.

use super::Catalog;
use crate::config::DataConfig;
use crate::{Error, Result};
use std::sync::{Arc, RwLock};

/// Holds the loaded catalog for reuse across requests.
///
/// The catalog is loaded on first access and kept until [`refresh`] or
/// [`invalidate`] is called. Callers receive an `Arc` snapshot, so a refresh
/// never changes a catalog that a request is already using.
///
/// [`refresh`]: CatalogCache::refresh
/// [`invalidate`]: CatalogCache::invalidate
#[derive(Debug)]
pub struct CatalogCache {
    config: Option<DataConfig>,
    current: RwLock<Option<Arc<Catalog>>>,
}

impl CatalogCache {
    /// Creates an empty cache that loads from the given data configuration.
    #[must_use]
    pub const fn new(config: DataConfig) -> Self {
        Self {
            config: Some(config),
            current: RwLock::new(None),
        }
    }

    /// Creates a cache pre-filled with a catalog and no backing files.
    ///
    /// Refreshing such a cache keeps the same catalog.
    #[must_use]
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            config: None,
            current: RwLock::new(Some(Arc::new(catalog))),
        }
    }

    /// Returns the cached catalog, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails.
    pub fn get(&self) -> Result<Arc<Catalog>> {
        if let Some(catalog) = self.read_current()? {
            return Ok(catalog);
        }
        self.refresh()
    }

    /// Reloads the catalog from its source and replaces the cached copy.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails; the previous copy is kept.
    pub fn refresh(&self) -> Result<Arc<Catalog>> {
        let Some(ref config) = self.config else {
            return Ok(self.read_current()?.unwrap_or_default());
        };

        let (catalog, _) = Catalog::load(config)?;
        let catalog = Arc::new(catalog);
        *self.current.write().map_err(lock_error)? = Some(Arc::clone(&catalog));
        tracing::debug!("Refreshed catalog cache");
        Ok(catalog)
    }

    /// Drops the cached copy; the next [`get`](CatalogCache::get) reloads.
    ///
    /// Has no effect on caches built with [`from_catalog`](CatalogCache::from_catalog).
    pub fn invalidate(&self) {
        if self.config.is_none() {
            return;
        }
        if let Ok(mut current) = self.current.write() {
            *current = None;
        }
    }

    /// Returns true if a catalog is currently cached.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.current.read().is_ok_and(|c| c.is_some())
    }

    fn read_current(&self) -> Result<Option<Arc<Catalog>>> {
        Ok(self.current.read().map_err(lock_error)?.clone())
    }
}

fn lock_error<T>(e: std::sync::PoisonError<T>) -> Error {
    Error::OperationFailed {
        operation: "lock_catalog_cache".to_string(),
        cause: e.to_string(),
    }
}
