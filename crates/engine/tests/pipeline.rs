use analytics::AnalyticsError;
use chrono::{Duration, NaiveDate};
use configuration::{PolicyBounds, WindowDefaults};
use engine::{DashboardEngine, EngineError, RenderRequest};
use loader::{DataLoader, LoaderError};
use std::fs;
use tempfile::TempDir;

const FILE: &str = "AIRBUS_2026-01-16.txt";

fn first_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 16).unwrap()
}

/// Writes `n` daily rows in file format: day-first dates, comma decimals,
/// newest first like the broker export.
fn write_history(dir: &TempDir, n: usize) {
    let mut text = String::from("date\touv\thaut\tbas\tclot\tvol\tdevise\n");
    for i in (0..n).rev() {
        let date = first_day() + Duration::days(i as i64);
        let close = 150.0 + (i as f64 * 0.7).sin() * 10.0 + i as f64 * 0.2;
        text.push_str(&format!(
            "{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{}\tEUR\n",
            date.format("%d/%m/%Y"),
            close - 0.5,
            close + 1.5,
            close - 1.5,
            close,
            1_000_000 + i * 1000,
        ).replace('.', ","));
    }
    fs::write(dir.path().join(FILE), text).unwrap();
}

fn engine_for(dir: &TempDir) -> DashboardEngine {
    let loader = DataLoader::new(dir.path(), vec![FILE.to_string(), "AIRBUS_2026-01-16".to_string()]);
    DashboardEngine::new(
        loader,
        WindowDefaults {
            short_window: 5,
            long_window: 20,
            volatility_window: 10,
        },
        PolicyBounds::default(),
    )
}

#[test]
fn full_history_produces_aligned_artifacts() {
    let dir = TempDir::new().unwrap();
    write_history(&dir, 80);
    let engine = engine_for(&dir);

    let artifacts = engine.render(&RenderRequest::default()).unwrap();

    assert_eq!(artifacts.source, dir.path().join(FILE));
    assert_eq!(artifacts.bars.len(), 80);
    assert_eq!(artifacts.rows.len(), 80);
    assert_eq!(artifacts.params.date_range.start, first_day());
    assert_eq!(artifacts.params.date_range.end, first_day() + Duration::days(79));
    assert!(artifacts.bars.windows(2).all(|w| w[0].date < w[1].date));

    let last = artifacts.bars.last().unwrap();
    assert_eq!(artifacts.kpis.last_close, last.close);
    assert!(artifacts.kpis.period_max_high.is_some());
    assert!(artifacts.kpis.average_volume.unwrap() > 1_000_000.0);
    assert!(artifacts.kpis.max_drawdown <= 0.0);

    assert_eq!(artifacts.intervals.first().unwrap().start_date, first_day());
    assert_eq!(artifacts.intervals.last().unwrap().end_date, last.date);
}

#[test]
fn request_overrides_defaults_and_range() {
    let dir = TempDir::new().unwrap();
    write_history(&dir, 80);
    let engine = engine_for(&dir);

    let request = RenderRequest {
        start: Some(first_day() + Duration::days(10)),
        end: Some(first_day() + Duration::days(39)),
        short_window: Some(3),
        ..RenderRequest::default()
    };
    let artifacts = engine.render(&request).unwrap();

    assert_eq!(artifacts.bars.len(), 30);
    assert_eq!(artifacts.params.short_window, 3);
    assert_eq!(artifacts.params.long_window, 20);
    assert_eq!(artifacts.rows[0].daily_return, None);
    assert!(artifacts.rows[2].ma_short.is_some());
}

#[test]
fn narrow_range_is_insufficient_and_recoverable() {
    let dir = TempDir::new().unwrap();
    write_history(&dir, 80);
    let engine = engine_for(&dir);

    let request = RenderRequest {
        start: Some(first_day()),
        end: Some(first_day() + Duration::days(13)),
        ..RenderRequest::default()
    };
    let err = engine.render(&request).unwrap_err();

    assert!(matches!(
        err,
        EngineError::Analytics(AnalyticsError::InsufficientData { rows: 14, required: 15 })
    ));
    assert!(err.is_recoverable());

    // The same engine keeps working once the range is widened.
    assert!(engine.render(&RenderRequest::default()).is_ok());
}

#[test]
fn inverted_range_is_rejected() {
    let dir = TempDir::new().unwrap();
    write_history(&dir, 30);
    let engine = engine_for(&dir);

    let request = RenderRequest {
        start: Some(first_day() + Duration::days(20)),
        end: Some(first_day()),
        ..RenderRequest::default()
    };
    assert!(matches!(engine.render(&request), Err(EngineError::InvalidParameters(_))));
}

#[test]
fn missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let engine = engine_for(&dir);

    let err = engine.render(&RenderRequest::default()).unwrap_err();
    assert!(matches!(err, EngineError::Loader(LoaderError::DataUnavailable { .. })));
    assert!(!err.is_recoverable());
}

#[test]
fn series_is_cached_until_invalidated() {
    let dir = TempDir::new().unwrap();
    write_history(&dir, 40);
    let engine = engine_for(&dir);

    assert_eq!(engine.render(&RenderRequest::default()).unwrap().bars.len(), 40);

    write_history(&dir, 60);
    assert_eq!(engine.render(&RenderRequest::default()).unwrap().bars.len(), 40);

    assert!(engine.invalidate());
    assert_eq!(engine.render(&RenderRequest::default()).unwrap().bars.len(), 60);
}

#[test]
fn renders_are_deterministic() {
    let dir = TempDir::new().unwrap();
    write_history(&dir, 50);
    let engine = engine_for(&dir);

    let first = engine.render(&RenderRequest::default()).unwrap();
    let second = engine.render(&RenderRequest::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn artifacts_serialize_for_the_chart_layer() {
    let dir = TempDir::new().unwrap();
    write_history(&dir, 20);
    let engine = engine_for(&dir);

    let json = serde_json::to_value(engine.render(&RenderRequest::default()).unwrap()).unwrap();
    for key in ["source", "params", "bars", "rows", "kpis", "intervals"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert!(json["rows"][0]["return"].is_null());
}
