//! Layer 0 domain types shared by every other crate in the workspace.

pub mod derived;
pub mod error;
pub mod params;
pub mod series;

// Re-export the core types to provide a clean public API.
pub use derived::{DerivedRow, KpiSet, RegimeInterval};
pub use error::CoreError;
pub use params::ParameterSet;
pub use series::{DateRange, PriceBar, PriceSeries};
