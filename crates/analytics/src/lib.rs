//! # Tapeview Analytics Engine
//!
//! The time-series feature engine behind the dashboard: every derived column
//! and scalar KPI the charts display is computed here.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   caches or presentation. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** `FeatureEngine`, `SummaryMetrics` and
//!   `RegimeSegmenter` hold no state. The same inputs always produce
//!   bit-identical outputs.
//!
//! ## Public API
//!
//! - `FeatureEngine`: per-row returns, moving averages, drawdown, rolling volatility, regime.
//! - `SummaryMetrics`: the `KpiSet` for a filtered window.
//! - `RegimeSegmenter`: contiguous regime intervals for chart shading.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod features;
pub mod regime;
pub mod stats;
pub mod summary;

// Re-export the key components to create a clean, public-facing API.
pub use error::AnalyticsError;
pub use features::{regime_flag, FeatureEngine};
pub use regime::RegimeSegmenter;
pub use summary::SummaryMetrics;

/// Fewest rows a filtered window may hold before features are computed.
pub const MIN_ROWS: usize = 15;

/// Trading sessions per year, used to annualize daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Regime assigned to rows where either moving average is still undefined.
/// `false` reads as "down".
pub const UNDEFINED_MA_REGIME: bool = false;
