use crate::error::LoaderError;
use crate::reader::read_path;
use core_types::PriceSeries;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A loaded series together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub source: PathBuf,
    pub series: Arc<PriceSeries>,
}

/// Resolves the price file from a base directory and a priority-ordered list
/// of candidate file names, then parses it.
#[derive(Debug, Clone)]
pub struct DataLoader {
    base_dir: PathBuf,
    candidates: Vec<String>,
}

impl DataLoader {
    pub fn new(base_dir: impl Into<PathBuf>, candidates: Vec<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            candidates,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The first candidate that exists as a file wins.
    pub fn resolve(&self) -> Result<PathBuf, LoaderError> {
        let searched: Vec<PathBuf> = self
            .candidates
            .iter()
            .map(|name| self.base_dir.join(name))
            .collect();

        match searched.iter().find(|path| path.is_file()) {
            Some(path) => Ok(path.clone()),
            None => Err(LoaderError::DataUnavailable { searched }),
        }
    }

    /// Resolves and parses the source, bypassing any cache.
    pub fn load(&self) -> Result<LoadedSeries, LoaderError> {
        let source = self.resolve()?;
        let series = read_path(&source)?;
        tracing::info!(source = %source.display(), rows = series.len(), "Loaded price history");
        Ok(LoadedSeries {
            source,
            series: Arc::new(series),
        })
    }
}
