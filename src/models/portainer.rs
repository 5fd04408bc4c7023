// Portainer API request/response bodies

use serde::{Deserialize, Serialize};

/// Endpoint type code Portainer uses for edge agents; never auto-selected.
pub const EDGE_AGENT_ENDPOINT_TYPE: i64 = 4;

/// Body of `POST /api/auth`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub jwt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Endpoint {
    pub id: i64,
    #[serde(rename = "Type")]
    pub endpoint_type: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Endpoint {
    pub fn is_edge_agent(&self) -> bool {
        self.endpoint_type == EDGE_AGENT_ENDPOINT_TYPE
    }
}

/// Body of `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    #[serde(rename = "InstanceID")]
    pub instance_id: String,
    #[serde(rename = "Version")]
    pub version: String,
}
