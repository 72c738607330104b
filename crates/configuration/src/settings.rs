use crate::error::ConfigError;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty or missing file is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub parameters: WindowDefaults,
    pub policy: PolicyBounds,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

/// Where to look for the price history.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory the candidate file names are resolved against.
    pub base_dir: PathBuf,
    /// File names to probe, in priority order. The first existing file wins.
    pub candidates: Vec<String>,
}

/// Window lengths used when a request does not specify its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WindowDefaults {
    pub short_window: usize,
    pub long_window: usize,
    pub volatility_window: usize,
}

/// An inclusive range a window is expected to fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Bounds {
    pub min: usize,
    pub max: usize,
}

impl Bounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: usize) -> bool {
        self.min <= value && value <= self.max
    }
}

/// The ranges the interactive controls offer.
///
/// These are advisory: the engine only requires positive windows, so values
/// outside the bounds are reported, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PolicyBounds {
    pub short_window: Bounds,
    pub long_window: Bounds,
    pub volatility_window: Bounds,
}

impl PolicyBounds {
    /// Describes every window that falls outside its bounds.
    pub fn check(&self, windows: &WindowDefaults) -> Vec<String> {
        [
            ("short_window", windows.short_window, self.short_window),
            ("long_window", windows.long_window, self.long_window),
            ("volatility_window", windows.volatility_window, self.volatility_window),
        ]
        .into_iter()
        .filter(|(_, value, bounds)| !bounds.contains(*value))
        .map(|(name, value, bounds)| {
            format!("{name}={value} is outside [{}, {}]", bounds.min, bounds.max)
        })
        .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub addr: SocketAddr,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

// --- Default Implementations ---
// This allows a user to omit any section from their toml
// and still have it work with sensible defaults.

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            candidates: vec![
                "AIRBUS_2026-01-16.txt".to_string(),
                "AIRBUS_2026-01-16".to_string(),
            ],
        }
    }
}

impl Default for WindowDefaults {
    fn default() -> Self {
        Self {
            short_window: 20,
            long_window: 50,
            volatility_window: 20,
        }
    }
}

impl Default for PolicyBounds {
    fn default() -> Self {
        Self {
            short_window: Bounds::new(5, 40),
            long_window: Bounds::new(30, 120),
            volatility_window: Bounds::new(10, 60),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Settings {
    /// Rejects configurations the engine could never run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.candidates.is_empty() {
            return Err(ConfigError::ValidationError(
                "data.candidates must name at least one file".to_string(),
            ));
        }

        let windows = [
            ("short_window", self.parameters.short_window),
            ("long_window", self.parameters.long_window),
            ("volatility_window", self.parameters.volatility_window),
        ];
        if let Some((name, _)) = windows.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ValidationError(format!(
                "parameters.{name} must be greater than zero"
            )));
        }

        for (name, bounds) in [
            ("short_window", self.policy.short_window),
            ("long_window", self.policy.long_window),
            ("volatility_window", self.policy.volatility_window),
        ] {
            if bounds.min > bounds.max {
                return Err(ConfigError::ValidationError(format!(
                    "policy.{name} has min {} above max {}",
                    bounds.min, bounds.max
                )));
            }
        }

        Ok(())
    }
}
