use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV row.
///
/// Only `date` and `close` are guaranteed; every other cell may have been
/// blank or unparseable in the source file and is carried as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    /// Traded volume. Kept as a float because exports sometimes format it with decimals.
    pub volume: Option<f64>,
}

impl PriceBar {
    /// A bar carrying only the mandatory fields.
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }
}

/// An inclusive calendar-date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidInput(
                "date_range".to_string(),
                format!("start {start} is after end {end}"),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The ascending, duplicate-free sequence of bars for one instrument.
///
/// Immutable once built: the only way in is [`PriceSeries::new`], which sorts
/// and de-duplicates, so every accessor can rely on strictly increasing dates.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
    #[serde(skip)]
    duplicates_dropped: usize,
}

impl PriceSeries {
    /// Sorts the bars by date. When two bars share a date, the one that came
    /// later in the input wins.
    pub fn new(mut bars: Vec<PriceBar>) -> Self {
        // Stable sort keeps input order among equal dates.
        bars.sort_by_key(|bar| bar.date);

        let mut unique: Vec<PriceBar> = Vec::with_capacity(bars.len());
        let mut duplicates_dropped = 0;
        for bar in bars {
            match unique.last_mut() {
                Some(last) if last.date == bar.date => {
                    *last = bar;
                    duplicates_dropped += 1;
                }
                _ => unique.push(bar),
            }
        }

        Self {
            bars: unique,
            duplicates_dropped,
        }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// How many rows were discarded by [`PriceSeries::new`] because their date repeated.
    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|bar| bar.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|bar| bar.date)
    }

    /// The full span covered by the series, or `None` when empty.
    pub fn full_range(&self) -> Option<DateRange> {
        match (self.first_date(), self.last_date()) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        }
    }

    /// Resolves optional filter bounds against the series' own span.
    pub fn resolve_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<DateRange, CoreError> {
        let full = self.full_range().ok_or_else(|| {
            CoreError::InvalidInput("date_range".to_string(), "series is empty".to_string())
        })?;
        DateRange::new(start.unwrap_or(full.start), end.unwrap_or(full.end))
    }

    /// The contiguous slice of bars whose date falls inside `range`.
    pub fn between(&self, range: &DateRange) -> &[PriceBar] {
        let lo = self.bars.partition_point(|bar| bar.date < range.start);
        let hi = self.bars.partition_point(|bar| bar.date <= range.end);
        &self.bars[lo..hi.max(lo)]
    }
}
