//! End-to-end checks of the feature engine, KPI reduction and regime
//! segmentation on small hand-computed series.

use analytics::{AnalyticsError, FeatureEngine, RegimeSegmenter, SummaryMetrics, MIN_ROWS};
use chrono::{Duration, NaiveDate};
use core_types::{DateRange, ParameterSet, PriceBar, PriceSeries};

const TOLERANCE: f64 = 1e-9;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 16).unwrap()
}

fn series(closes: &[f64]) -> PriceSeries {
    PriceSeries::new(
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar::from_close(start() + Duration::days(i as i64), close))
            .collect(),
    )
}

fn params(short: usize, long: usize, vol: usize) -> ParameterSet {
    ParameterSet {
        short_window: short,
        long_window: long,
        volatility_window: vol,
        date_range: DateRange::new(start(), start() + Duration::days(1000)).unwrap(),
    }
}

#[test]
fn monotonic_rise_scenario() {
    let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
    let data = series(&closes);

    let rows = FeatureEngine::new().compute(data.bars(), &params(5, 10, 20)).unwrap();

    assert_eq!(rows.len(), 20);
    assert_eq!(rows[0].daily_return, None);
    assert_eq!(rows[3].ma_short, None);
    assert!((rows[9].ma_short.unwrap() - 107.0).abs() < TOLERANCE);
    assert_eq!(rows[8].ma_long, None);
    assert!((rows[9].ma_long.unwrap() - 104.5).abs() < TOLERANCE);
    assert!(rows.iter().all(|row| row.drawdown == 0.0));

    // Both averages first exist at index 9, and short > long from there on.
    assert!(rows[..9].iter().all(|row| !row.regime));
    assert!(rows[9..].iter().all(|row| row.regime));

    let intervals = RegimeSegmenter::new().segment_rows(&rows);
    assert_eq!(intervals.len(), 2);
    assert!(!intervals[0].regime);
    assert_eq!(intervals[1].start_date, rows[9].date);
    assert_eq!(intervals[1].end_date, rows[19].date);
}

#[test]
fn steady_decline_max_drawdown() {
    let mut closes = vec![100.0, 90.0, 80.0, 70.0];
    // Pad with flat closes so the window clears the minimum row count.
    closes.extend(std::iter::repeat(70.0).take(MIN_ROWS - closes.len()));
    let data = series(&closes);

    let rows = FeatureEngine::new().compute(data.bars(), &params(5, 10, 3)).unwrap();
    let kpis = SummaryMetrics::new().summarize(data.bars(), &rows).unwrap();

    assert!((kpis.max_drawdown - (70.0 / 100.0 - 1.0)).abs() < TOLERANCE);
    assert!((kpis.max_drawdown + 0.30).abs() < TOLERANCE);
    assert!((kpis.period_return + 0.30).abs() < TOLERANCE);
}

#[test]
fn rolling_volatility_scenario() {
    // Returns at indices 1..=3 are -2%, +1.5% and +0.5%.
    let mut closes = vec![100.0];
    for r in [-0.02, 0.015, 0.005] {
        let last = *closes.last().unwrap();
        closes.push(last * (1.0 + r));
    }
    closes.extend(std::iter::repeat(*closes.last().unwrap()).take(11));
    let data = series(&closes);

    let rows = FeatureEngine::new().compute(data.bars(), &params(5, 10, 3)).unwrap();

    assert_eq!(rows[2].rolling_volatility, None);
    let expected = 0.2861817604250837;
    assert!((rows[3].rolling_volatility.unwrap() - expected).abs() < TOLERANCE);
}

#[test]
fn short_filtered_window_produces_no_artifacts() {
    let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
    let data = series(&closes);
    let range = DateRange::new(start(), start() + Duration::days(13)).unwrap();

    let window = data.between(&range);
    assert_eq!(window.len(), 14);

    let err = FeatureEngine::new().compute(window, &params(5, 10, 3)).unwrap_err();
    assert_eq!(err, AnalyticsError::InsufficientData { rows: 14, required: MIN_ROWS });
}

#[test]
fn period_return_uses_filtered_window_only() {
    let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
    let data = series(&closes);
    let range = DateRange::new(start() + Duration::days(10), start() + Duration::days(29)).unwrap();
    let window = data.between(&range);

    let rows = FeatureEngine::new().compute(window, &params(5, 10, 3)).unwrap();
    let kpis = SummaryMetrics::new().summarize(window, &rows).unwrap();

    assert_eq!(kpis.last_close, 129.0);
    assert!((kpis.period_return - (129.0 / 110.0 - 1.0)).abs() < TOLERANCE);
}

#[test]
fn short_window_longer_than_long_window_is_computed() {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
    let data = series(&closes);

    let rows = FeatureEngine::new().compute(data.bars(), &params(20, 5, 10)).unwrap();

    // A slower "short" average lags below the long one on a rising series.
    assert!(rows[19..].iter().all(|row| !row.regime));
}
