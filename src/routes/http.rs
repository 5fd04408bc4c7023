// GET handlers: version, sensors

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::AppState;
use crate::version::{NAME, VERSION};

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/sensors — snapshots from the last poll cycle (empty before the first one).
pub(super) async fn list_sensors_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(state.registry.read().await.clone())
}

pub(super) async fn get_sensor_handler(
    State(state): State<AppState>,
    Path(unique_id): Path<String>,
) -> axum::response::Response {
    let registry = state.registry.read().await;
    match registry.iter().find(|s| s.unique_id == unique_id) {
        Some(snapshot) => axum::Json(snapshot.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(serde_json::json!({ "error": format!("unknown sensor: {}", unique_id) })),
        )
            .into_response(),
    }
}
