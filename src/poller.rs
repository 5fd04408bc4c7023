// Background poller: drives sensor updates and publishes their snapshots.
// Sensors are updated one after another, so refreshes on a shared client never overlap.

use crate::models::SensorSnapshot;
use crate::sensors::Sensor;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};
use tokio::time::{Duration, Instant, interval};

/// Rate limit for "no receivers" debug log (avoid logging every cycle when no one is on /ws/sensors)
const NO_RECEIVERS_LOG_INTERVAL: Duration = Duration::from_secs(60);

/// Latest published snapshots, in sensor order.
pub type SensorRegistry = Arc<RwLock<Vec<SensorSnapshot>>>;

pub struct PollerDeps {
    pub sensors: Vec<Box<dyn Sensor>>,
    pub registry: SensorRegistry,
    pub tx: broadcast::Sender<Vec<SensorSnapshot>>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

pub struct PollerConfig {
    pub update_interval: Duration,
    /// How often to log a summary (real time, independent of update_interval).
    pub summary_log_interval: Duration,
}

/// Updates every sensor in order and returns their snapshots.
pub async fn run_cycle(sensors: &mut [Box<dyn Sensor>]) -> Vec<SensorSnapshot> {
    let mut snapshots = Vec::with_capacity(sensors.len());
    for sensor in sensors.iter_mut() {
        sensor.update().await;
        snapshots.push(sensor.snapshot().await);
    }
    snapshots
}

pub fn spawn(deps: PollerDeps, config: PollerConfig) -> tokio::task::JoinHandle<()> {
    let PollerDeps {
        mut sensors,
        registry,
        tx,
        mut shutdown_rx,
    } = deps;
    let PollerConfig {
        update_interval,
        summary_log_interval,
    } = config;

    tokio::spawn(async move {
        let mut tick = interval(update_interval);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut summary_tick = interval(summary_log_interval);
        summary_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut cycles_total: u64 = 0;
        let mut last_no_receivers_log: Option<Instant> = None;

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    let snapshots = run_cycle(&mut sensors).await;
                    cycles_total += 1;
                    *registry.write().await = snapshots.clone();

                    if tx.send(snapshots).is_err() {
                        let should_log = last_no_receivers_log
                            .is_none_or(|t| t.elapsed() >= NO_RECEIVERS_LOG_INTERVAL);
                        if should_log {
                            tracing::debug!(
                                operation = "broadcast_snapshots",
                                "No active WebSocket clients; broadcast channel has no receivers"
                            );
                            last_no_receivers_log = Some(Instant::now());
                        }
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Poller shutting down");
                    break;
                }
                _ = summary_tick.tick() => {
                    tracing::info!(
                        sensors = sensors.len(),
                        cycles_total,
                        ws_clients = tx.receiver_count(),
                        "poller stats"
                    );
                }
            }
        }
    })
}
