//! Read-mostly cache of parsed price series, keyed by source file.
//!
//! Readers load an `Arc<HashMap<..>>` snapshot with no locking. Inserts and
//! invalidations swap in a new map, so a reader sees either the old or the
//! new snapshot. Entries never expire on their own; call
//! [`SeriesCache::invalidate`] or [`SeriesCache::clear`] when a file changes.

use crate::error::LoaderError;
use crate::reader::read_path;
use crate::source::{DataLoader, LoadedSeries};
use arc_swap::ArcSwap;
use core_types::PriceSeries;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

type Entries = HashMap<PathBuf, Arc<PriceSeries>>;

#[derive(Debug)]
pub struct SeriesCache {
    entries: ArcSwap<Entries>,
}

impl Default for SeriesCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesCache {
    pub fn new() -> Self {
        Self {
            entries: ArcSwap::from_pointee(Entries::new()),
        }
    }

    /// Returns the cached series for the loader's source, parsing it on a miss.
    pub fn get_or_load(&self, loader: &DataLoader) -> Result<LoadedSeries, LoaderError> {
        let source = loader.resolve()?;
        let key = cache_key(&source);

        if let Some(series) = self.entries.load().get(&key) {
            tracing::debug!(source = %source.display(), "Series cache hit");
            return Ok(LoadedSeries {
                source,
                series: Arc::clone(series),
            });
        }

        tracing::debug!(source = %source.display(), "Series cache miss");
        let series = Arc::new(read_path(&source)?);
        tracing::info!(source = %source.display(), rows = series.len(), "Loaded price history");

        self.entries.rcu(|current| {
            let mut next = Entries::clone(current);
            next.insert(key.clone(), Arc::clone(&series));
            next
        });

        Ok(LoadedSeries { source, series })
    }

    /// Drops the entry for `source`. Returns whether anything was cached.
    pub fn invalidate(&self, source: &Path) -> bool {
        let key = cache_key(source);
        let previous = self.entries.rcu(|current| {
            let mut next = Entries::clone(current);
            next.remove(&key);
            next
        });
        previous.contains_key(&key)
    }

    pub fn clear(&self) {
        self.entries.store(Arc::new(Entries::new()));
    }

    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.load().is_empty()
    }
}

/// Canonical path when the file exists, so `./a.txt` and `a.txt` share an entry.
fn cache_key(source: &Path) -> PathBuf {
    source
        .canonicalize()
        .unwrap_or_else(|_| source.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture(closes: &[f64]) -> (TempDir, DataLoader) {
        let dir = TempDir::new().unwrap();
        write_prices(&dir, closes);
        let loader = DataLoader::new(dir.path(), vec!["prices.txt".into()]);
        (dir, loader)
    }

    fn write_prices(dir: &TempDir, closes: &[f64]) {
        let mut text = String::from("date\tclot\n");
        for (i, close) in closes.iter().enumerate() {
            text.push_str(&format!("{:02}/01/2025\t{close}\n", i + 1));
        }
        fs::write(dir.path().join("prices.txt"), text).unwrap();
    }

    #[test]
    fn second_load_is_served_from_cache() {
        let (dir, loader) = fixture(&[1.0, 2.0]);
        let cache = SeriesCache::new();

        let first = cache.get_or_load(&loader).unwrap();
        // The file changes on disk, but the cached snapshot is returned.
        write_prices(&dir, &[1.0, 2.0, 3.0]);
        let second = cache.get_or_load(&loader).unwrap();

        assert!(Arc::ptr_eq(&first.series, &second.series));
        assert_eq!(second.series.len(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidate_forces_a_reparse() {
        let (dir, loader) = fixture(&[1.0, 2.0]);
        let cache = SeriesCache::new();

        let first = cache.get_or_load(&loader).unwrap();
        write_prices(&dir, &[1.0, 2.0, 3.0]);

        assert!(cache.invalidate(&first.source));
        assert!(cache.is_empty());
        assert!(!cache.invalidate(&first.source));

        let reloaded = cache.get_or_load(&loader).unwrap();
        assert_eq!(reloaded.series.len(), 3);
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let dir = TempDir::new().unwrap();
        let loader = DataLoader::new(dir.path(), vec!["missing.txt".into()]);
        let cache = SeriesCache::new();

        assert!(cache.get_or_load(&loader).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_empties_the_cache() {
        let (_dir, loader) = fixture(&[1.0]);
        let cache = SeriesCache::new();
        cache.get_or_load(&loader).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
