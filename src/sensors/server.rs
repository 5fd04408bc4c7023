// Server sensor: Portainer version as state, instance summary as attributes

use super::{Sensor, server_entity_name};
use crate::portainer_client::PortainerClient;
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::debug;

pub struct ServerSensor {
    client: Arc<PortainerClient>,
    name: String,
    state: Option<String>,
}

impl ServerSensor {
    pub fn new(client: Arc<PortainerClient>, server_name: &str) -> Self {
        Self {
            client,
            name: server_entity_name(server_name),
            state: None,
        }
    }
}

#[async_trait]
impl Sensor for ServerSensor {
    fn unique_id(&self) -> &str {
        &self.name
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    fn icon(&self) -> &'static str {
        "mdi:server"
    }

    async fn attributes(&self) -> Map<String, Value> {
        let mut attrs = Map::new();
        attrs.insert("PortainerId".into(), json!(self.client.instance_id().await));
        attrs.insert("FriendlyName".into(), json!(self.name));
        attrs.insert("Version".into(), json!(self.client.version().await));
        attrs.insert(
            "NumberOfContainers".into(),
            json!(self.client.container_count().await),
        );
        attrs.insert("url".into(), json!(self.client.url()));
        attrs
    }

    async fn update(&mut self) {
        self.client.refresh().await;
        let instance_id = self.client.instance_id().await;
        debug!(
            sensor = %self.name,
            instance_id = instance_id.as_deref().unwrap_or("unknown"),
            url = %self.client.url(),
            "Updating Portainer server"
        );
        self.state = self.client.version().await;
    }
}
