use crate::{error::AppError, AppState};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use engine::{DashboardArtifacts, RenderRequest};
use std::sync::Arc;

/// # GET /api/dashboard
/// Renders the dashboard for the given filter and windows. Omitted query
/// parameters fall back to the configured defaults.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(request): Query<RenderRequest>,
) -> Result<Json<DashboardArtifacts>, AppError> {
    tracing::debug!(?request, "Rendering dashboard");
    // A cache miss reads the price file from disk.
    let artifacts = tokio::task::spawn_blocking(move || state.engine.render(&request)).await??;
    Ok(Json(artifacts))
}

/// # POST /api/cache/invalidate
/// Forces the next dashboard request to re-read the price file.
pub async fn invalidate_cache(State(state): State<Arc<AppState>>) -> StatusCode {
    let dropped = state.engine.invalidate();
    tracing::info!(dropped, "Series cache invalidated");
    StatusCode::NO_CONTENT
}
