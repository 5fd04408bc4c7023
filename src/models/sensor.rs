// Published sensor state

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Point-in-time view of one sensor, as served over HTTP and WebSocket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSnapshot {
    pub unique_id: String,
    pub name: String,
    pub state: Option<String>,
    pub icon: String,
    pub attributes: Map<String, Value>,
}
