use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Not enough data: {rows} rows in the selected window, at least {required} required")]
    InsufficientData { rows: usize, required: usize },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[from] CoreError),

    #[error("Misaligned inputs: {0}")]
    Misaligned(String),
}
