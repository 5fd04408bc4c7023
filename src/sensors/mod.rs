// Sensor entities: read-only views over a shared PortainerClient

mod container;
mod format;
mod server;

pub use container::ContainerSensor;
pub use format::{format_created, format_ports};
pub use server::ServerSensor;

use crate::models::SensorSnapshot;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Common entity surface, dispatched as `Box<dyn Sensor>` by the poller.
#[async_trait]
pub trait Sensor: Send + Sync {
    fn unique_id(&self) -> &str;

    fn name(&self) -> &str;

    /// State as of the last `update()`; `None` before the first one.
    fn state(&self) -> Option<&str>;

    fn icon(&self) -> &'static str;

    /// Display attributes; may read the client's cached state at call time.
    async fn attributes(&self) -> Map<String, Value>;

    /// Refreshes the backing data and recomputes `state`.
    async fn update(&mut self);

    async fn snapshot(&self) -> SensorSnapshot {
        SensorSnapshot {
            unique_id: self.unique_id().to_string(),
            name: self.name().to_string(),
            state: self.state().map(str::to_string),
            icon: self.icon().to_string(),
            attributes: self.attributes().await,
        }
    }
}

/// Entity name of the server sensor for a configured instance name.
pub fn server_entity_name(server_name: &str) -> String {
    format!("portainer_server_{}", server_name)
}
