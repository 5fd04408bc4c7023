// HTTP + WebSocket routes

mod http;
mod ws;

use axum::{Router, routing::get};
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};

use crate::models::SensorSnapshot;
use crate::poller::SensorRegistry;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) snapshots_tx: broadcast::Sender<Vec<SensorSnapshot>>,
    pub(crate) registry: SensorRegistry,
}

pub fn app(snapshots_tx: broadcast::Sender<Vec<SensorSnapshot>>, registry: SensorRegistry) -> Router {
    let state = AppState {
        snapshots_tx,
        registry,
    };
    Router::new()
        .route("/", get(|| async { "Portainer sensors" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/sensors", get(http::list_sensors_handler)) // GET /api/sensors
        .route("/api/sensors/{unique_id}", get(http::get_sensor_handler)) // GET /api/sensors/{unique_id}
        .route("/ws/sensors", get(ws::ws_sensors)) // WS /ws/sensors
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
