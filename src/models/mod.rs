// Domain models: Portainer API payloads and published sensor state

mod container;
mod portainer;
mod sensor;

pub use container::{Container, Port};
pub use portainer::{AuthRequest, AuthResponse, EDGE_AGENT_ENDPOINT_TYPE, Endpoint, ServerStatus};
pub use sensor::SensorSnapshot;
