use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("No price file found (searched: {})", display_paths(.searched))]
    DataUnavailable { searched: Vec<PathBuf> },

    #[error("Price file {} has no usable rows: {reason}", .path.display())]
    DataMalformed { path: PathBuf, reason: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl LoaderError {
    pub(crate) fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        Self::DataMalformed {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
