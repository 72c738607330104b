use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{cli::ParameterArgs, load_config, telemetry, Settings, DEFAULT_CONFIG_FILE};
use engine::{DashboardArtifacts, DashboardEngine, RenderRequest};
use std::path::PathBuf;
use std::process::ExitCode;

mod report;

/// The main entry point for the Tapeview dashboard application.
#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file, if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let settings = load_config(&cli.config)
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;
    let _guard = telemetry::init(&settings.logging)?;

    // Execute the appropriate command
    let rendered = match cli.command {
        Commands::Report(args) => render(&settings, &args)?.map(|artifacts| {
            println!("{}", report::render(&artifacts));
        }),
        Commands::Export(args) => handle_export(&settings, args)?,
        Commands::Serve => Some(web_server::run_server(&settings, settings.server.addr).await?),
    };

    // The log guard must drop before the process exits.
    Ok(match rendered {
        Some(()) => ExitCode::SUCCESS,
        None => ExitCode::from(RENDER_FAILED),
    })
}

/// Exit status when the dashboard cannot be rendered for the given parameters.
const RENDER_FAILED: u8 = 2;

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Price history analytics for a single listed equity.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML settings file. Missing files fall back to defaults.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the KPI header and the regime intervals.
    Report(ParameterArgs),
    /// Write every dashboard artifact as JSON.
    Export(ExportArgs),
    /// Start the HTTP dashboard API.
    Serve,
}

#[derive(Parser)]
struct ExportArgs {
    #[command(flatten)]
    params: ParameterArgs,

    /// File to write to. Prints to stdout when omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_export(settings: &Settings, args: ExportArgs) -> anyhow::Result<Option<()>> {
    let Some(artifacts) = render(settings, &args.params)? else {
        return Ok(None);
    };
    let json = serde_json::to_string_pretty(&artifacts)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Dashboard exported");
        }
        None => println!("{json}"),
    }
    Ok(Some(()))
}

/// Renders once. A recoverable error (too few rows, bad windows) is reported
/// to the user and yields `None`; anything else propagates.
fn render(settings: &Settings, args: &ParameterArgs) -> anyhow::Result<Option<DashboardArtifacts>> {
    let engine = DashboardEngine::from_settings(settings);
    let windows = args.windows(engine.defaults());
    let request = RenderRequest {
        start: args.start,
        end: args.end,
        short_window: Some(windows.short_window),
        long_window: Some(windows.long_window),
        volatility_window: Some(windows.volatility_window),
    };

    match engine.render(&request) {
        Ok(artifacts) => Ok(Some(artifacts)),
        Err(err) if err.is_recoverable() => {
            tracing::warn!(error = %err, "Dashboard not rendered");
            eprintln!("Cannot render the dashboard: {err}");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}
