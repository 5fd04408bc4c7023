use anyhow::Result;
use portainer_sensors::*;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};
use tokio::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

/// Snapshot lists kept in the broadcast channel for /ws/sensors (slow clients may lag).
const BROADCAST_CAPACITY: usize = 16;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        name = version::NAME,
        version = version::VERSION,
        instances = app_config.instances.len(),
        "Starting"
    );

    let sensors = setup::setup_all(
        &app_config.instances,
        app_config.polling.client_options(),
    )
    .await;
    if sensors.is_empty() {
        tracing::warn!("No sensors were created; check the [[instances]] configuration");
    }

    let registry: poller::SensorRegistry = Arc::new(RwLock::new(Vec::new()));
    let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let poller_handle = poller::spawn(
        poller::PollerDeps {
            sensors,
            registry: registry.clone(),
            tx: tx.clone(),
            shutdown_rx,
        },
        poller::PollerConfig {
            update_interval: Duration::from_secs(app_config.polling.update_interval_secs),
            summary_log_interval: Duration::from_secs(
                app_config.polling.summary_log_interval_secs,
            ),
        },
    );

    let app = routes::app(tx, registry);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = async {
            #[cfg(unix)]
            {
                let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                    Ok(s) => s,
                    Err(_) => {
                        let _ = tokio::signal::ctrl_c().await;
                        return;
                    }
                };
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            #[cfg(not(unix))]
            {
                let _ = tokio::signal::ctrl_c().await;
            }
        } => {
            tracing::info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
            let _ = poller_handle.await;
        }
    }

    Ok(())
}
