use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-row features, aligned 1:1 with the filtered price bars.
///
/// `None` marks a value that is undefined for this row (not enough history yet).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedRow {
    pub date: NaiveDate,
    /// Simple return against the previous row's close. `None` on the first row.
    #[serde(rename = "return")]
    pub daily_return: Option<f64>,
    pub ma_short: Option<f64>,
    pub ma_long: Option<f64>,
    pub cumulative_peak: f64,
    /// Always `<= 0`, exactly `0` on a new peak.
    pub drawdown: f64,
    /// Annualized sample standard deviation of returns over the volatility window.
    pub rolling_volatility: Option<f64>,
    /// `true` while the short moving average sits above the long one.
    pub regime: bool,
}

/// A maximal run of rows sharing the same regime value. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeInterval {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub regime: bool,
}

/// The scalar header metrics for one filtered window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiSet {
    pub last_close: f64,
    /// Last close over first close, minus one.
    pub period_return: f64,
    /// `None` when no bar in the window carried a high.
    pub period_max_high: Option<f64>,
    /// Mean over the bars that carried a volume.
    pub average_volume: Option<f64>,
    /// `None` when fewer than two returns are available.
    pub annualized_volatility: Option<f64>,
    pub max_drawdown: f64,
}
