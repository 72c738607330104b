use axum::{
    routing::{get, post},
    Router,
};
use configuration::Settings;
use engine::DashboardEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
// Note: Tracing is handled by the caller's telemetry setup.

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Debug)]
pub struct AppState {
    pub engine: DashboardEngine,
}

/// Builds the application routes around an engine.
pub fn router(engine: DashboardEngine) -> Router {
    let app_state = Arc::new(AppState { engine });
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/cache/invalidate", post(handlers::invalidate_cache))
        .with_state(app_state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(settings: &Settings, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(DashboardEngine::from_settings(settings));

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
