// Per-instance setup: validate config, build the client, first refresh, create sensors

use crate::config::InstanceConfig;
use crate::portainer_client::{ClientOptions, PortainerClient};
use crate::sensors::{ContainerSensor, Sensor, ServerSensor};
use std::sync::Arc;
use tracing::{debug, info};

/// Builds the server sensor followed by one sensor per container known after the
/// initial refresh. The set is fixed from here on; containers created later get no
/// sensor until the next setup.
pub async fn setup_platform(
    config: &InstanceConfig,
    options: ClientOptions,
) -> anyhow::Result<Vec<Box<dyn Sensor>>> {
    let instance = config.validate()?;
    debug!(url = %instance.url, "Loading Portainer server");

    let client = Arc::new(PortainerClient::new(
        &instance.url,
        &instance.username,
        &instance.password,
        options,
    )?);
    client.refresh().await;

    let containers = client.containers().await;
    let mut sensors: Vec<Box<dyn Sensor>> = Vec::with_capacity(containers.len() + 1);
    sensors.push(Box::new(ServerSensor::new(client.clone(), &instance.name)));
    for container in containers {
        sensors.push(Box::new(ContainerSensor::new(
            client.clone(),
            container,
            &instance.name,
        )));
    }
    info!(
        instance = %instance.name,
        url = %instance.url,
        containers = sensors.len() - 1,
        "Portainer instance set up"
    );
    Ok(sensors)
}

/// Runs setup for every configured instance; failed instances are logged and skipped.
pub async fn setup_all(
    instances: &[InstanceConfig],
    options: ClientOptions,
) -> Vec<Box<dyn Sensor>> {
    let mut sensors = Vec::new();
    for (index, instance) in instances.iter().enumerate() {
        match setup_platform(instance, options).await {
            Ok(mut s) => sensors.append(&mut s),
            Err(e) => tracing::error!(
                error = %e,
                instance_index = index,
                instance = instance.name.as_deref().unwrap_or("<unnamed>"),
                "Portainer setup failed; no sensors created for this instance"
            ),
        }
    }
    sensors
}
