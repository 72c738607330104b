use crate::error::AnalyticsError;
use crate::stats::{mean, sample_std};
use crate::TRADING_DAYS_PER_YEAR;
use core_types::{DerivedRow, KpiSet, PriceBar};

/// Reduces a filtered window and its feature rows into the header KPIs.
#[derive(Debug, Default, Clone, Copy)]
pub struct SummaryMetrics {}

impl SummaryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the `KpiSet` for one render cycle.
    ///
    /// `data` and `rows` must be the same window, as produced by
    /// `FeatureEngine::compute`. Period performance uses the first and last
    /// close of this window, not of the whole history.
    pub fn summarize(
        &self,
        data: &[PriceBar],
        rows: &[DerivedRow],
    ) -> Result<KpiSet, AnalyticsError> {
        if data.len() != rows.len() {
            return Err(AnalyticsError::Misaligned(format!(
                "{} price bars but {} derived rows",
                data.len(),
                rows.len()
            )));
        }

        let (first, last) = match (data.first(), data.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(AnalyticsError::InsufficientData {
                    rows: 0,
                    required: crate::MIN_ROWS,
                });
            }
        };

        let period_max_high = data
            .iter()
            .filter_map(|bar| bar.high)
            .fold(None, |max: Option<f64>, high| Some(max.map_or(high, |m| m.max(high))));

        let volumes: Vec<f64> = data.iter().filter_map(|bar| bar.volume).collect();
        let returns: Vec<f64> = rows.iter().filter_map(|row| row.daily_return).collect();

        let max_drawdown = rows
            .iter()
            .map(|row| row.drawdown)
            .fold(0.0_f64, f64::min);

        let kpis = KpiSet {
            last_close: last.close,
            period_return: last.close / first.close - 1.0,
            period_max_high,
            average_volume: mean(&volumes),
            annualized_volatility: sample_std(&returns).map(|std| std * TRADING_DAYS_PER_YEAR.sqrt()),
            max_drawdown,
        };

        tracing::debug!(?kpis, "Summarized window");

        Ok(kpis)
    }
}
