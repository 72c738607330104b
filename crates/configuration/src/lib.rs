use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
#[cfg(feature = "clap")]
pub mod cli;
pub mod error;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use settings::{
    Bounds, DataSettings, LoggingSettings, PolicyBounds, ServerSettings, Settings,
    WindowDefaults,
};

/// The configuration file looked for when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "tapeview.toml";

/// Prefix for environment overrides, e.g. `TAPEVIEW_SERVER__ADDR=0.0.0.0:8080`.
pub const ENV_PREFIX: &str = "TAPEVIEW";

/// Loads the application configuration.
///
/// This function is the primary entry point for this crate. Built-in defaults
/// are overlaid by the TOML file at `path` (optional) and then by
/// `TAPEVIEW_*` environment variables. The result is validated before it is
/// returned.
pub fn load_config(path: &Path) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("data.candidates"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}
