//! Liveness probe.

use axum::extract::State;
use axum::Json;

use crate::AppState;

/// GET /health — reports service and database health.
pub async fn check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database = state.db.health_check().await;
    Json(serde_json::json!({
        "status": "ok",
        "database": database,
    }))
}
