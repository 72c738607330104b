//! Total parsers for individual cells and header names.
//!
//! Nothing here fails: a cell that cannot be understood becomes `None`, and the
//! row-level code decides whether that drops the row.

use chrono::NaiveDate;

/// The columns the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Date,
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl Column {
    /// Maps a raw header to a column, ignoring case and surrounding whitespace.
    pub fn from_header(header: &str) -> Option<Self> {
        let normalized = normalize_header(header);
        match normalized.as_str() {
            "date" | "jour" => Some(Self::Date),
            "ouv" | "open" | "ouverture" => Some(Self::Open),
            "haut" | "high" | "plus haut" => Some(Self::High),
            "bas" | "low" | "plus bas" => Some(Self::Low),
            "clot" | "close" | "cloture" | "clôture" | "dernier" => Some(Self::Close),
            "vol" | "volume" => Some(Self::Volume),
            _ => None,
        }
    }
}

/// Trims whitespace and a leading byte-order mark, then lowercases.
pub fn normalize_header(header: &str) -> String {
    header.trim().trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Parses a day-first calendar date.
///
/// Accepts `dd/mm/yyyy`, `dd-mm-yyyy`, `dd.mm.yyyy`, two-digit years, and
/// ISO `yyyy-mm-dd`. A trailing time component is ignored.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let token = cell.split_whitespace().next()?;
    let token = token.split('T').next()?;

    let separator = ['/', '-', '.'].into_iter().find(|&sep| token.contains(sep))?;
    let parts: Vec<&str> = token.split(separator).collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }

    let (day, month, year) = if parts[0].len() == 4 {
        (parts[2], parts[1], parts[0])
    } else {
        (parts[0], parts[1], parts[2])
    };

    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = match year.len() {
        2 => expand_two_digit_year(year.parse().ok()?),
        4 => year.parse().ok()?,
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// `00..=68` is 2000..=2068, `69..=99` is 1969..=1999.
fn expand_two_digit_year(year: i32) -> i32 {
    if year <= 68 { 2000 + year } else { 1900 + year }
}

/// Parses a numeric cell, tolerating locale formatting.
///
/// Blank cells and placeholders such as `-` or `n/a` are missing. Spaces
/// (including non-breaking ones) are thousands separators. When both `,` and
/// `.` appear, the last one is the decimal separator and the other must group
/// digits in threes. A lone comma is a decimal separator; a separator repeated
/// on its own is a thousands separator. Anything else is missing.
pub fn parse_number(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    if matches!(
        trimmed.to_ascii_lowercase().as_str(),
        "-" | "na" | "n/a" | "nan" | "null"
    ) {
        return None;
    }

    let compact: String = trimmed
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}'))
        .collect();

    let normalized = normalize_separators(&compact)?;
    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Rewrites `compact` so `f64::from_str` reads it, or `None` if the
/// separators cannot be read unambiguously.
fn normalize_separators(compact: &str) -> Option<String> {
    let commas = compact.matches(',').count();
    let dots = compact.matches('.').count();

    let (decimal, thousands) = match (commas, dots) {
        (0, 0) | (0, 1) => return Some(compact.to_string()),
        (1, 0) => return Some(compact.replace(',', ".")),
        (_, 0) => return ungroup(compact, ','),
        (0, _) => return ungroup(compact, '.'),
        _ if compact.rfind(',') > compact.rfind('.') => (',', '.'),
        _ => ('.', ','),
    };

    let (whole, fraction) = compact.rsplit_once(decimal)?;
    if whole.contains(decimal) {
        return None;
    }
    Some(format!("{}.{fraction}", ungroup(whole, thousands)?))
}

/// Strips `sep` from `digits`, requiring every group after the first to hold
/// exactly three digits.
fn ungroup(digits: &str, sep: char) -> Option<String> {
    let mut groups = digits.split(sep);
    let head = groups.next()?;
    let head_len = head.trim_start_matches(['-', '+']).len();
    if head_len == 0 || head_len > 3 {
        return None;
    }

    let mut out = head.to_string();
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        out.push_str(group);
    }
    Some(out)
}
