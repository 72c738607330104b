use crate::cells::{parse_date, parse_number, Column};
use crate::error::LoaderError;
use core_types::{PriceBar, PriceSeries};
use csv::{ByteRecord, ReaderBuilder};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads and validates a tab-separated price file.
///
/// # Errors
///
/// Returns `LoaderError::Io` if the file cannot be opened,
/// `LoaderError::Csv` if the table itself cannot be read, and
/// `LoaderError::DataMalformed` if no row survives cleaning.
pub fn read_path(path: &Path) -> Result<PriceSeries, LoaderError> {
    let file = File::open(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_series(BufReader::new(file), path)
}

/// Parses a tab-separated table from any reader. `origin` only labels errors and logs.
///
/// Rows whose date or close cannot be parsed are dropped, as are rows whose
/// close is zero or negative. Every other cell that cannot be parsed is kept
/// as a missing value.
pub fn read_series<R: Read>(reader: R, origin: &Path) -> Result<PriceSeries, LoaderError> {
    let csv_error = |source: csv::Error| LoaderError::Csv {
        path: origin.to_path_buf(),
        source,
    };

    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.byte_headers().map_err(csv_error)?.clone();
    let columns = map_columns(&headers);

    for required in [Column::Date, Column::Close] {
        if !columns.contains_key(&required) {
            return Err(LoaderError::malformed(
                origin,
                format!("missing required {required:?} column"),
            ));
        }
    }

    let mut bars = Vec::new();
    let mut dropped = 0usize;
    let mut non_positive = 0usize;
    let mut record = ByteRecord::new();

    while csv_reader.read_byte_record(&mut record).map_err(csv_error)? {
        let cell = |column: Column| -> Option<String> {
            let idx = *columns.get(&column)?;
            record
                .get(idx)
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        };

        let date = cell(Column::Date).and_then(|c| parse_date(&c));
        let close = cell(Column::Close).and_then(|c| parse_number(&c));

        match (date, close) {
            (Some(_), Some(close)) if close <= 0.0 => non_positive += 1,
            (Some(date), Some(close)) => bars.push(PriceBar {
                date,
                open: cell(Column::Open).and_then(|c| parse_number(&c)),
                high: cell(Column::High).and_then(|c| parse_number(&c)),
                low: cell(Column::Low).and_then(|c| parse_number(&c)),
                close,
                volume: cell(Column::Volume).and_then(|c| parse_number(&c)),
            }),
            _ => dropped += 1,
        }
    }

    if bars.is_empty() {
        let reason = match (dropped, non_positive) {
            (0, 0) => "file contains no data rows".to_string(),
            (0, n) => format!("all {n} rows had a non-positive close"),
            (d, n) => format!("all {} rows lacked a parseable date or positive close", d + n),
        };
        return Err(LoaderError::malformed(origin, reason));
    }

    if dropped > 0 {
        tracing::warn!(
            source = %origin.display(),
            dropped,
            "Dropped rows without a parseable date or close"
        );
    }
    if non_positive > 0 {
        tracing::warn!(
            source = %origin.display(),
            dropped = non_positive,
            "Dropped rows with a zero or negative close"
        );
    }

    let series = PriceSeries::new(bars);
    if series.duplicates_dropped() > 0 {
        tracing::warn!(
            source = %origin.display(),
            duplicates = series.duplicates_dropped(),
            "Duplicate dates found; kept the last row for each"
        );
    }

    tracing::debug!(source = %origin.display(), rows = series.len(), "Parsed price series");

    Ok(series)
}

/// First matching header wins when a file repeats a column.
fn map_columns(headers: &ByteRecord) -> HashMap<Column, usize> {
    let mut columns = HashMap::new();
    for (idx, raw) in headers.iter().enumerate() {
        if let Some(column) = Column::from_header(&String::from_utf8_lossy(raw)) {
            columns.entry(column).or_insert(idx);
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse(text: &str) -> Result<PriceSeries, LoaderError> {
        read_series(text.as_bytes(), Path::new("test.txt"))
    }

    #[test]
    fn parses_and_sorts_rows() {
        let text = "date\touv\thaut\tbas\tclot\tvol\n\
                    17/01/2025\t171\t173\t170\t172.5\t1000\n\
                    16/01/2025\t170\t172\t169\t171\t2000\n";
        let series = parse(text).unwrap();

        assert_eq!(series.len(), 2);
        let first = series.bars()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 1, 16).unwrap());
        assert_eq!(first.open, Some(170.0));
        assert_eq!(first.high, Some(172.0));
        assert_eq!(first.low, Some(169.0));
        assert_eq!(first.close, 171.0);
        assert_eq!(first.volume, Some(2000.0));
    }

    #[test]
    fn rows_without_date_or_close_are_dropped() {
        let text = "date\tclot\tvol\n\
                    16/01/2025\t171\t10\n\
                    not-a-date\t172\t10\n\
                    18/01/2025\t\t10\n\
                    19/01/2025\t173\tbad\n";
        let series = parse(text).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.bars()[1].close, 173.0);
        assert_eq!(series.bars()[1].volume, None);
    }

    #[test]
    fn non_positive_closes_are_dropped() {
        let text = "date\tclot\n\
                    16/01/2025\t171\n\
                    17/01/2025\t0\n\
                    18/01/2025\t-5\n\
                    19/01/2025\t173\n";
        let series = parse(text).unwrap();

        assert_eq!(series.len(), 2);
        assert!(series.bars().iter().all(|bar| bar.close > 0.0));
    }

    #[test]
    fn only_non_positive_closes_is_malformed() {
        match parse("date\tclot\n16/01/2025\t0\n17/01/2025\t-1\n").unwrap_err() {
            LoaderError::DataMalformed { reason, .. } => {
                assert!(reason.contains("non-positive close"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn headers_are_trimmed_and_case_insensitive() {
        let text = " Date \t CLOT \n16/01/2025\t171\n";
        assert_eq!(parse(text).unwrap().len(), 1);
    }

    #[test]
    fn short_rows_leave_trailing_fields_missing() {
        let text = "date\tclot\tvol\n16/01/2025\t171\n";
        let series = parse(text).unwrap();
        assert_eq!(series.bars()[0].volume, None);
    }

    #[test]
    fn missing_close_column_is_malformed() {
        let err = parse("date\tvol\n16/01/2025\t10\n").unwrap_err();
        assert!(matches!(err, LoaderError::DataMalformed { .. }));
    }

    #[test]
    fn zero_valid_rows_is_malformed() {
        let err = parse("date\tclot\nbad\t1\n16/01/2025\tx\n").unwrap_err();
        match err {
            LoaderError::DataMalformed { reason, .. } => assert!(reason.contains("all 2 rows")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn header_only_file_is_malformed() {
        assert!(matches!(
            parse("date\tclot\n").unwrap_err(),
            LoaderError::DataMalformed { .. }
        ));
    }
}
