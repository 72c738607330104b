use chrono::NaiveDate;
use core_types::{DerivedRow, KpiSet, ParameterSet, PriceBar, RegimeInterval};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One dashboard request. Every field is optional; gaps are filled from the
/// configured defaults and the span of the loaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub short_window: Option<usize>,
    pub long_window: Option<usize>,
    pub volatility_window: Option<usize>,
}

/// Everything the chart layer receives for one render cycle.
///
/// `bars`, `rows` and the regime intervals are aligned on the same filtered
/// window; `kpis` summarises that window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardArtifacts {
    /// The file the series was read from.
    pub source: PathBuf,
    pub params: ParameterSet,
    pub bars: Vec<PriceBar>,
    pub rows: Vec<DerivedRow>,
    pub kpis: KpiSet,
    pub intervals: Vec<RegimeInterval>,
}
