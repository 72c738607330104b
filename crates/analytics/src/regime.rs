use crate::error::AnalyticsError;
use chrono::NaiveDate;
use core_types::{DerivedRow, RegimeInterval};

/// Collapses a per-row regime flag into contiguous shading intervals.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegimeSegmenter {}

impl RegimeSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `dates` into maximal runs of equal `regimes` value.
    ///
    /// The output covers every index exactly once, in date order, and no two
    /// neighbouring intervals share a regime. Empty input gives no intervals.
    pub fn segment(
        &self,
        dates: &[NaiveDate],
        regimes: &[bool],
    ) -> Result<Vec<RegimeInterval>, AnalyticsError> {
        if dates.len() != regimes.len() {
            return Err(AnalyticsError::Misaligned(format!(
                "{} dates but {} regime flags",
                dates.len(),
                regimes.len()
            )));
        }

        let mut intervals = Vec::new();
        if dates.is_empty() {
            return Ok(intervals);
        }

        let mut start = 0;
        for i in 1..dates.len() {
            if regimes[i] != regimes[i - 1] {
                intervals.push(RegimeInterval {
                    start_date: dates[start],
                    end_date: dates[i - 1],
                    regime: regimes[i - 1],
                });
                start = i;
            }
        }

        let last = dates.len() - 1;
        intervals.push(RegimeInterval {
            start_date: dates[start],
            end_date: dates[last],
            regime: regimes[last],
        });

        tracing::debug!(intervals = intervals.len(), "Segmented regimes");

        Ok(intervals)
    }

    /// Convenience over [`RegimeSegmenter::segment`] for feature rows.
    pub fn segment_rows(&self, rows: &[DerivedRow]) -> Vec<RegimeInterval> {
        let dates: Vec<NaiveDate> = rows.iter().map(|row| row.date).collect();
        let regimes: Vec<bool> = rows.iter().map(|row| row.regime).collect();
        // Both vectors come from the same rows, so they cannot be misaligned.
        self.segment(&dates, &regimes).unwrap_or_default()
    }
}
