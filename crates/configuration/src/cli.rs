use crate::settings::WindowDefaults;
use chrono::NaiveDate;
use clap::Args;

/// Dashboard parameters accepted on the command line.
///
/// Anything left out falls back to the configured defaults, or, for the date
/// bounds, to the first and last date in the file.
#[derive(Debug, Clone, Default, Args)]
pub struct ParameterArgs {
    /// First date to include (format: YYYY-MM-DD).
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last date to include (format: YYYY-MM-DD).
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Short moving-average window, in trading rows.
    #[arg(long)]
    pub short_window: Option<usize>,

    /// Long moving-average window, in trading rows.
    #[arg(long)]
    pub long_window: Option<usize>,

    /// Rolling volatility window, in trading rows.
    #[arg(long)]
    pub volatility_window: Option<usize>,
}

impl ParameterArgs {
    /// Overlays the given windows on top of `defaults`.
    pub fn windows(&self, defaults: &WindowDefaults) -> WindowDefaults {
        WindowDefaults {
            short_window: self.short_window.unwrap_or(defaults.short_window),
            long_window: self.long_window.unwrap_or(defaults.long_window),
            volatility_window: self.volatility_window.unwrap_or(defaults.volatility_window),
        }
    }
}
