use crate::error::CoreError;
use crate::series::DateRange;
use serde::{Deserialize, Serialize};

/// Everything a render cycle is parameterised by.
///
/// Windows are counted in trading rows, not calendar days. No ordering is
/// imposed between `short_window` and `long_window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub short_window: usize,
    pub long_window: usize,
    pub volatility_window: usize,
    pub date_range: DateRange,
}

impl ParameterSet {
    /// Checks the hard constraints only: every window must be positive.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, value) in [
            ("short_window", self.short_window),
            ("long_window", self.long_window),
            ("volatility_window", self.volatility_window),
        ] {
            if value == 0 {
                return Err(CoreError::InvalidInput(
                    name.to_string(),
                    "window must be greater than zero".to_string(),
                ));
            }
        }
        Ok(())
    }
}
