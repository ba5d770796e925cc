use axum::{
    extract::State,
    routing::get,
    Json, Router,
};

use crate::error::Result;
use crate::services::{DashboardService, DashboardStats};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(get_stats))
}

async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>> {
    let dashboard_service = DashboardService::new(state.store.clone(), state.guard.clone());
    Ok(Json(dashboard_service.stats().await))
}
