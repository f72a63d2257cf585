//! Load-once cache for the source relations.

use anyhow::{anyhow, Context, Result};
use log::info;
use std::sync::{Arc, RwLock};

use crate::core::SourceTables;
use crate::io::loaders::SourceLoader;
use crate::preprocessing::schema::resolve_sources;

/// Memoizes the schema-resolved source relations.
///
/// The first [`get`](Self::get) loads through the wrapped loader and runs
/// schema resolution; later calls share the same immutable tables until
/// [`refresh`](Self::refresh) or [`invalidate`](Self::invalidate).
///
/// # Example
///
/// ```no_run
/// use carshare_metrics::io::{CsvSourceLoader, DatasetCache};
///
/// # fn main() -> anyhow::Result<()> {
/// let cache = DatasetCache::new(CsvSourceLoader::from_dir("datasets"));
/// let tables = cache.get()?;
/// println!("{} trips", tables.trips.height());
/// # Ok(())
/// # }
/// ```
pub struct DatasetCache<L> {
    loader: L,
    tables: RwLock<Option<Arc<SourceTables>>>,
}

impl<L: SourceLoader> DatasetCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            tables: RwLock::new(None),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// The cached tables, loading them on first access.
    pub fn get(&self) -> Result<Arc<SourceTables>> {
        {
            let slot = self.tables.read().map_err(|_| poisoned())?;
            if let Some(tables) = slot.as_ref() {
                return Ok(Arc::clone(tables));
            }
        }

        let mut slot = self.tables.write().map_err(|_| poisoned())?;
        // Another caller may have populated the slot while we waited
        if let Some(tables) = slot.as_ref() {
            return Ok(Arc::clone(tables));
        }

        let tables = Arc::new(self.populate()?);
        *slot = Some(Arc::clone(&tables));
        Ok(tables)
    }

    /// Reload unconditionally and replace the cached tables.
    ///
    /// On failure the previously cached tables stay in place.
    pub fn refresh(&self) -> Result<Arc<SourceTables>> {
        let tables = Arc::new(self.populate()?);
        let mut slot = self.tables.write().map_err(|_| poisoned())?;
        *slot = Some(Arc::clone(&tables));
        info!("Dataset cache refreshed");
        Ok(tables)
    }

    /// Drop the cached tables; the next `get` reloads.
    pub fn invalidate(&self) -> Result<()> {
        let mut slot = self.tables.write().map_err(|_| poisoned())?;
        *slot = None;
        info!("Dataset cache invalidated");
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.tables
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    fn populate(&self) -> Result<SourceTables> {
        let raw = self
            .loader
            .load()
            .context("Failed to load source relations")?;
        let resolved = resolve_sources(&raw).context("Failed to resolve source schemas")?;
        info!("Dataset cache populated");
        Ok(resolved)
    }
}

fn poisoned() -> anyhow::Error {
    anyhow!("dataset cache lock poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::sample_tables;
    use crate::core::PipelineError;
    use crate::io::loaders::StaticSourceLoader;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingLoader {
        loads: AtomicUsize,
        tables: SourceTables,
    }

    impl CountingLoader {
        fn new(tables: SourceTables) -> Self {
            Self {
                loads: AtomicUsize::new(0),
                tables,
            }
        }

        fn loads(&self) -> usize {
            self.loads.load(Ordering::SeqCst)
        }
    }

    impl SourceLoader for CountingLoader {
        fn load(&self) -> Result<SourceTables> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(self.tables.clone())
        }
    }

    #[test]
    fn test_get_loads_once() {
        let cache = DatasetCache::new(CountingLoader::new(sample_tables()));
        assert!(!cache.is_loaded());

        let first = cache.get().unwrap();
        let second = cache.get().unwrap();

        assert!(cache.is_loaded());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.loader().loads(), 1);
    }

    #[test]
    fn test_cached_tables_are_schema_resolved() {
        let cache = DatasetCache::new(StaticSourceLoader::new(sample_tables()));
        let tables = cache.get().unwrap();
        assert!(tables.cities.column("city").is_ok());
        assert!(tables.cities.column("city_name").is_err());
    }

    #[test]
    fn test_refresh_reloads() {
        let cache = DatasetCache::new(CountingLoader::new(sample_tables()));
        let first = cache.get().unwrap();
        let refreshed = cache.refresh().unwrap();

        assert!(!Arc::ptr_eq(&first, &refreshed));
        assert_eq!(cache.loader().loads(), 2);
        assert!(Arc::ptr_eq(&refreshed, &cache.get().unwrap()));
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let cache = DatasetCache::new(CountingLoader::new(sample_tables()));
        cache.get().unwrap();
        cache.invalidate().unwrap();

        assert!(!cache.is_loaded());
        cache.get().unwrap();
        assert_eq!(cache.loader().loads(), 2);
    }

    #[test]
    fn test_schema_error_is_not_cached() {
        let mut tables = sample_tables();
        tables.cars = tables.cars.drop("model").unwrap();
        let cache = DatasetCache::new(CountingLoader::new(tables));

        let err = cache.get().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::SchemaError(_))
        ));
        assert!(!cache.is_loaded());

        cache.get().unwrap_err();
        assert_eq!(cache.loader().loads(), 2);
    }
}
