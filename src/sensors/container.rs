// Container sensor: one per container discovered at setup

use super::{Sensor, format_created, format_ports, server_entity_name};
use crate::models::Container;
use crate::portainer_client::PortainerClient;
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{debug, error};

/// Holds its own copy of the container record; `update()` re-syncs it by id from the
/// client's current list and keeps the stale copy when the id is missing.
pub struct ContainerSensor {
    client: Arc<PortainerClient>,
    container: Container,
    server_name: String,
    name: String,
    state: Option<String>,
}

impl ContainerSensor {
    pub fn new(client: Arc<PortainerClient>, container: Container, server_name: &str) -> Self {
        let name = format!("portainer_{}_{}", server_name, container.display_name());
        Self {
            client,
            container,
            server_name: server_name.to_string(),
            name,
            state: None,
        }
    }

    pub fn container(&self) -> &Container {
        &self.container
    }
}

#[async_trait]
impl Sensor for ContainerSensor {
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
        "mdi:docker"
    }

    async fn attributes(&self) -> Map<String, Value> {
        let c = &self.container;
        let mut attrs = Map::new();
        attrs.insert("Name".into(), json!(c.display_name()));
        attrs.insert("Image".into(), json!(c.image));
        attrs.insert("ContainerId".into(), json!(c.id));
        attrs.insert("Created".into(), json!(format_created(c.created)));
        attrs.insert("Status".into(), json!(c.status));
        attrs.insert("Ports".into(), json!(format_ports(&c.ports)));
        attrs.insert("url".into(), json!(self.client.url()));
        attrs.insert(
            "parent_friendly_name".into(),
            json!(server_entity_name(&self.server_name)),
        );
        attrs.insert(
            "parent_instance_id".into(),
            json!(self.client.instance_id().await),
        );
        attrs
    }

    async fn update(&mut self) {
        match self.client.find_container(&self.container.id).await {
            Some(current) => {
                debug!(
                    container = %current.display_name(),
                    image = %current.image,
                    url = %self.client.url(),
                    "Updating container"
                );
                self.state = Some(current.state.clone());
                self.container = current;
            }
            None => {
                error!(sensor = %self.name, container_id = %self.container.id, "Container not found");
            }
        }
    }
}
