// Poller tests: cycle ordering, registry publication, shutdown

mod common;

use common::{FakePortainer, Route};
use portainer_sensors::config::InstanceConfig;
use portainer_sensors::poller::{PollerConfig, PollerDeps, SensorRegistry, run_cycle, spawn};
use portainer_sensors::setup::setup_platform;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, broadcast};

async fn sensors_for(fake: &FakePortainer) -> Vec<Box<dyn portainer_sensors::sensors::Sensor>> {
    let config = InstanceConfig {
        name: Some("prod".into()),
        url: Some(fake.url.clone()),
        username: Some(common::USERNAME.into()),
        password: Some(common::PASSWORD.into()),
    };
    setup_platform(&config, common::options(Duration::ZERO))
        .await
        .unwrap()
}

#[tokio::test]
async fn run_cycle_updates_server_before_containers() {
    let fake = FakePortainer::start().await;
    let mut sensors = sensors_for(&fake).await;
    fake.set_reply(
        Route::Containers,
        200,
        json!([
            { "Id": "aaa111", "Names": ["/my_app"], "State": "restarting" },
            { "Id": "bbb222", "Names": ["/db"], "State": "running" }
        ]),
    );

    let snapshots = run_cycle(&mut sensors).await;

    assert_eq!(snapshots.len(), 3);
    assert_eq!(snapshots[0].unique_id, "portainer_server_prod");
    assert_eq!(snapshots[0].state.as_deref(), Some("2.19.4"));
    assert_eq!(snapshots[1].state.as_deref(), Some("restarting"));
    assert_eq!(snapshots[2].state.as_deref(), Some("running"));
}

#[tokio::test]
async fn poller_publishes_to_registry_and_channel_then_stops() {
    let fake = FakePortainer::start().await;
    let sensors = sensors_for(&fake).await;
    let registry: SensorRegistry = Arc::new(RwLock::new(Vec::new()));
    let (tx, mut rx) = broadcast::channel(8);
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let handle = spawn(
        PollerDeps {
            sensors,
            registry: registry.clone(),
            tx,
            shutdown_rx,
        },
        PollerConfig {
            update_interval: Duration::from_millis(25),
            summary_log_interval: Duration::from_secs(3600),
        },
    );

    let published = tokio::time::timeout(Duration::from_secs(3), rx.recv())
        .await
        .expect("poller should publish within 3s")
        .unwrap();
    assert_eq!(published.len(), 3);

    let _ = shutdown_tx.send(());
    handle.await.unwrap();

    let stored = registry.read().await;
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[0].unique_id, "portainer_server_prod");
}
