// Docker container records as returned by Portainer's Docker proxy

use serde::{Deserialize, Serialize};

/// One entry of `GET /api/endpoints/{id}/docker/containers/json?all=1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Container {
    pub id: String,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub image: String,
    /// Unix timestamp (seconds).
    #[serde(default)]
    pub created: i64,
    /// Free text, e.g. "Up 3 hours".
    #[serde(default)]
    pub status: String,
    /// Short token, e.g. "running" or "exited".
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub ports: Vec<Port>,
}

impl Container {
    /// First name with the leading `/` removed; the id when Docker reported no names.
    pub fn display_name(&self) -> String {
        self.names
            .first()
            .map(|n| n.trim_start_matches('/').to_string())
            .unwrap_or_else(|| self.id.clone())
    }
}

/// Fields default when absent so one odd mapping cannot fail the whole container list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Port {
    #[serde(rename = "IP", default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default)]
    pub private_port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_port: Option<u16>,
    #[serde(rename = "Type", default)]
    pub protocol: String,
}
