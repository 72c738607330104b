use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use core_types::{KpiSet, RegimeInterval};
use engine::DashboardArtifacts;

const MISSING: &str = "n/a";

/// Renders the KPI header and the regime intervals for the terminal.
pub fn render(artifacts: &DashboardArtifacts) -> String {
    let range = &artifacts.params.date_range;
    format!(
        "Source: {}\nPeriod: {} to {} ({} rows)\n\n{}\n\n{}",
        artifacts.source.display(),
        range.start,
        range.end,
        artifacts.bars.len(),
        kpi_table(&artifacts.kpis),
        regime_table(&artifacts.intervals),
    )
}

fn kpi_table(kpis: &KpiSet) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Last Close",
        "Performance",
        "Max High",
        "Avg Volume",
        "Volatility (ann.)",
        "Max Drawdown",
    ]);
    table.add_row(vec![
        Cell::new(euros(kpis.last_close)).set_alignment(CellAlignment::Right),
        Cell::new(percent(kpis.period_return)).set_alignment(CellAlignment::Right),
        Cell::new(optional(kpis.period_max_high, euros)).set_alignment(CellAlignment::Right),
        Cell::new(optional(kpis.average_volume, thousands)).set_alignment(CellAlignment::Right),
        Cell::new(optional(kpis.annualized_volatility, percent))
            .set_alignment(CellAlignment::Right),
        Cell::new(percent(kpis.max_drawdown)).set_alignment(CellAlignment::Right),
    ]);
    table
}

fn regime_table(intervals: &[RegimeInterval]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["From", "To", "Regime"]);
    for interval in intervals {
        table.add_row(vec![
            interval.start_date.to_string(),
            interval.end_date.to_string(),
            regime_label(interval.regime).to_string(),
        ]);
    }
    table
}

fn regime_label(regime: bool) -> &'static str {
    if regime { "bullish" } else { "bearish" }
}

fn optional(value: Option<f64>, format: fn(f64) -> String) -> String {
    value.map(format).unwrap_or_else(|| MISSING.to_string())
}

pub fn euros(value: f64) -> String {
    format!("{value:.2} €")
}

pub fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Rounds to a whole number and groups digits in threes.
pub fn thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_have_two_decimals_and_currency() {
        assert_eq!(euros(107.0), "107.00 €");
        assert_eq!(euros(98.765), "98.77 €");
    }

    #[test]
    fn fractions_print_as_percentages() {
        assert_eq!(percent(-0.3), "-30.00%");
        assert_eq!(percent(0.12345), "12.35%");
    }

    #[test]
    fn volumes_are_rounded_and_grouped() {
        assert_eq!(thousands(999.4), "999");
        assert_eq!(thousands(1_234_567.6), "1,234,568");
        assert_eq!(thousands(1000.0), "1,000");
        assert_eq!(thousands(-12_345.0), "-12,345");
    }

    #[test]
    fn missing_kpis_are_marked() {
        assert_eq!(optional(None, euros), MISSING);
        assert_eq!(optional(Some(1.0), euros), "1.00 €");
    }
}
