// WebSocket stream of published sensor snapshots

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use bytes::Bytes;
use tokio::sync::broadcast;
use tokio::time::{Duration, timeout};

use super::AppState;
use crate::models::SensorSnapshot;
use crate::poller::SensorRegistry;

pub(super) const WS_PING_INTERVAL: Duration = Duration::from_secs(30);
pub(super) const WS_SEND_TIMEOUT: Duration = Duration::from_secs(10);

pub(super) async fn ws_sensors(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let tx = state.snapshots_tx.clone();
    let registry = state.registry.clone();
    ws.on_upgrade(move |socket| async move {
        let mut rx = tx.subscribe();
        if let Err(e) = stream_sensors(socket, &mut rx, registry).await {
            tracing::info!("Sensor stream error: {}", e);
        }
    })
}

async fn send_text(socket: &mut WebSocket, json: String) -> bool {
    let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Text(json.into()))).await;
    matches!(r, Ok(Ok(())))
}

/// Sends the current registry first, then every published cycle.
async fn stream_sensors(
    mut socket: WebSocket,
    rx: &mut broadcast::Receiver<Vec<SensorSnapshot>>,
    registry: SensorRegistry,
) -> anyhow::Result<()> {
    tracing::info!("Client connected to sensor stream");

    let initial = serde_json::to_string(&*registry.read().await)?;
    if !send_text(&mut socket, initial).await {
        return Ok(());
    }

    let mut ping_interval = tokio::time::interval(WS_PING_INTERVAL);
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    ping_interval.tick().await;
    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(snapshots) => {
                        let json = serde_json::to_string(&snapshots)?;
                        if !send_text(&mut socket, json).await {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("WebSocket /ws/sensors client lagged, skipped {} messages", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            _ = ping_interval.tick() => {
                let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Ping(Bytes::new()))).await;
                if !matches!(r, Ok(Ok(()))) {
                    break;
                }
            }
        }
    }
    Ok(())
}
