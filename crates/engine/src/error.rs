use analytics::AnalyticsError;
use core_types::CoreError;
use loader::LoaderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[from] CoreError),
}

impl EngineError {
    /// `true` when adjusting the parameters could make the next cycle succeed.
    ///
    /// Loader failures are fatal for the process; a short window or a bad
    /// parameter only fails the current cycle.
    pub fn is_recoverable(&self) -> bool {
        match self {
            EngineError::Loader(_) => false,
            EngineError::Analytics(AnalyticsError::Misaligned(_)) => false,
            EngineError::Analytics(_) | EngineError::InvalidParameters(_) => true,
        }
    }
}
