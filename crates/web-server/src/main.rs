use configuration::{load_config, telemetry, DEFAULT_CONFIG_FILE};
use std::path::Path;

// This main function is the entry point when running `cargo run -p web-server`.
// Its only job is to load settings and call `run_server` from the crate's library.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = load_config(Path::new(DEFAULT_CONFIG_FILE))?;
    let _guard = telemetry::init(&settings.logging)?;

    web_server::run_server(&settings, settings.server.addr).await
}
