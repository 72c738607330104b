use crate::error::AnalyticsError;
use crate::stats::{rolling_sample_std, running_max, simple_returns, trailing_mean};
use crate::{MIN_ROWS, TRADING_DAYS_PER_YEAR, UNDEFINED_MA_REGIME};
use core_types::{DerivedRow, ParameterSet, PriceBar};

/// A stateless calculator turning a filtered window of bars into aligned feature rows.
#[derive(Debug, Default, Clone, Copy)]
pub struct FeatureEngine {}

impl FeatureEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects windows too short to derive anything meaningful from.
    ///
    /// This is the gate between the date-range filter and feature computation.
    pub fn ensure_sufficient(&self, data: &[PriceBar]) -> Result<(), AnalyticsError> {
        if data.len() < MIN_ROWS {
            return Err(AnalyticsError::InsufficientData {
                rows: data.len(),
                required: MIN_ROWS,
            });
        }
        Ok(())
    }

    /// Computes every per-row feature for an already filtered window.
    ///
    /// # Arguments
    ///
    /// * `data` - The bars inside the selected date range, ascending by date.
    /// * `params` - Window lengths. The date range inside is informational here.
    ///
    /// # Returns
    ///
    /// One `DerivedRow` per input bar, or `InsufficientData` when fewer than
    /// [`MIN_ROWS`] bars were supplied.
    pub fn compute(
        &self,
        data: &[PriceBar],
        params: &ParameterSet,
    ) -> Result<Vec<DerivedRow>, AnalyticsError> {
        self.ensure_sufficient(data)?;
        params.validate()?;

        tracing::debug!(
            rows = data.len(),
            short_window = params.short_window,
            long_window = params.long_window,
            volatility_window = params.volatility_window,
            "Computing features"
        );

        let closes: Vec<f64> = data.iter().map(|bar| bar.close).collect();

        let returns = simple_returns(&closes);
        let ma_short = trailing_mean(&closes, params.short_window);
        let ma_long = trailing_mean(&closes, params.long_window);
        let peaks = running_max(&closes);
        let volatility = rolling_sample_std(&returns, params.volatility_window);
        let annualizer = TRADING_DAYS_PER_YEAR.sqrt();

        let rows = data
            .iter()
            .enumerate()
            .map(|(i, bar)| DerivedRow {
                date: bar.date,
                daily_return: returns[i],
                ma_short: ma_short[i],
                ma_long: ma_long[i],
                cumulative_peak: peaks[i],
                drawdown: drawdown(bar.close, peaks[i]),
                rolling_volatility: volatility[i].map(|std| std * annualizer),
                regime: regime_flag(ma_short[i], ma_long[i]),
            })
            .collect();

        Ok(rows)
    }
}

/// Proportional distance below the running peak.
fn drawdown(close: f64, peak: f64) -> f64 {
    if close >= peak {
        return 0.0;
    }
    close / peak - 1.0
}

/// `true` when the short average is above the long one. Rows where either
/// average is still undefined fall back to [`UNDEFINED_MA_REGIME`].
pub fn regime_flag(ma_short: Option<f64>, ma_long: Option<f64>) -> bool {
    match (ma_short, ma_long) {
        (Some(short), Some(long)) => short > long,
        _ => UNDEFINED_MA_REGIME,
    }
}
