// Portainer REST client: session handling, throttled refresh, cached server/container state

mod error;
mod throttle;

pub use error::ClientError;

use crate::models::{AuthRequest, AuthResponse, Container, Endpoint, ServerStatus};
use crate::version::USER_AGENT;
use reqwest::Client;
use std::time::Duration;
use throttle::Throttle;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, instrument, warn};

/// Minimum time between two refresh attempts unless configured otherwise.
pub const DEFAULT_MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(120);

/// Per-request timeout unless configured otherwise.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    pub min_refresh_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            min_refresh_interval: DEFAULT_MIN_REFRESH_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Token and endpoint are resolved once and kept for the client's lifetime.
#[derive(Debug, Default)]
struct Session {
    token: Option<String>,
    endpoint_id: Option<i64>,
}

#[derive(Debug, Default)]
struct CachedState {
    instance_id: Option<String>,
    version: Option<String>,
    containers: Vec<Container>,
}

pub struct PortainerClient {
    http: Client,
    /// As configured; published in sensor attributes.
    url: String,
    /// `url` without trailing slashes; used to build request paths.
    base_url: String,
    username: String,
    password: String,
    throttle: Throttle,
    session: Mutex<Session>,
    state: RwLock<CachedState>,
}

impl PortainerClient {
    pub fn new(
        url: &str,
        username: &str,
        password: &str,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(options.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ClientError::InvalidClient)?;
        Ok(Self {
            http,
            url: url.to_string(),
            base_url: url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
            throttle: Throttle::new(options.min_refresh_interval),
            session: Mutex::new(Session::default()),
            state: RwLock::new(CachedState::default()),
        })
    }

    /// Re-fetches status and containers, at most once per minimum interval.
    ///
    /// Never fails: each failing call is logged and degrades only its own field
    /// (containers to empty, status to `None`). Calls inside the cooldown return
    /// immediately without touching the network.
    pub async fn refresh(&self) {
        if !self.throttle.try_acquire() {
            debug!(url = %self.base_url, "refresh skipped, minimum interval not elapsed");
            return;
        }

        let mut session = self.session.lock().await;

        if session.token.is_none() {
            session.token = match self.authenticate().await {
                Ok(token) => Some(token),
                Err(e) => {
                    error!(
                        error = %e,
                        operation = "authenticate",
                        url = %self.base_url,
                        "Failed to get JWT"
                    );
                    None
                }
            };
        }
        let Some(token) = session.token.clone() else {
            error!(url = %self.base_url, "Failed to authenticate with Portainer");
            return;
        };

        if session.endpoint_id.is_none() {
            session.endpoint_id = match self.first_endpoint_id(&token).await {
                Ok(Some(id)) => {
                    debug!(endpoint_id = id, url = %self.base_url, "resolved endpoint");
                    Some(id)
                }
                Ok(None) => {
                    warn!(url = %self.base_url, "no endpoint other than edge agents found");
                    None
                }
                Err(e) => {
                    error!(
                        error = %e,
                        operation = "list_endpoints",
                        url = %self.base_url,
                        "Failed to get endpoint ID"
                    );
                    None
                }
            };
        }
        let Some(endpoint_id) = session.endpoint_id else {
            return;
        };

        let containers = match self.list_containers(&token, endpoint_id).await {
            Ok(c) => c,
            Err(e) => {
                error!(
                    error = %e,
                    operation = "list_containers",
                    endpoint_id,
                    url = %self.base_url,
                    "Failed to get containers"
                );
                Vec::new()
            }
        };
        self.state.write().await.containers = containers;

        let status = match self.server_status(&token).await {
            Ok(s) => Some(s),
            Err(e) => {
                error!(
                    error = %e,
                    operation = "server_status",
                    url = %self.base_url,
                    "Failed to get status"
                );
                None
            }
        };
        let mut state = self.state.write().await;
        match status {
            Some(s) => {
                state.instance_id = Some(s.instance_id);
                state.version = Some(s.version);
            }
            None => {
                state.instance_id = None;
                state.version = None;
            }
        }
    }

    #[instrument(skip(self), fields(client = "portainer", operation = "authenticate"))]
    async fn authenticate(&self) -> Result<String, ClientError> {
        let body = AuthRequest {
            username: &self.username,
            password: &self.password,
        };
        let response: AuthResponse = self
            .http
            .post(format!("{}/api/auth", self.base_url))
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        response.jwt.ok_or(ClientError::MissingToken)
    }

    /// First endpoint in list order that is not an edge agent.
    #[instrument(skip(self, token), fields(client = "portainer", operation = "list_endpoints"))]
    async fn first_endpoint_id(&self, token: &str) -> Result<Option<i64>, ClientError> {
        let endpoints: Vec<Endpoint> = self
            .http
            .get(format!("{}/api/endpoints", self.base_url))
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(endpoints
            .iter()
            .find(|e| !e.is_edge_agent())
            .map(|e| e.id))
    }

    #[instrument(skip(self, token), fields(client = "portainer", operation = "list_containers"))]
    async fn list_containers(
        &self,
        token: &str,
        endpoint_id: i64,
    ) -> Result<Vec<Container>, ClientError> {
        let containers = self
            .http
            .get(format!(
                "{}/api/endpoints/{}/docker/containers/json?all=1",
                self.base_url, endpoint_id
            ))
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(containers)
    }

    #[instrument(skip(self, token), fields(client = "portainer", operation = "server_status"))]
    async fn server_status(&self, token: &str) -> Result<ServerStatus, ClientError> {
        let status = self
            .http
            .get(format!("{}/api/status", self.base_url))
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(status)
    }

    /// The URL exactly as configured.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn instance_id(&self) -> Option<String> {
        self.state.read().await.instance_id.clone()
    }

    pub async fn version(&self) -> Option<String> {
        self.state.read().await.version.clone()
    }

    /// Containers as of the last refresh that reached the container step, in API order.
    pub async fn containers(&self) -> Vec<Container> {
        self.state.read().await.containers.clone()
    }

    pub async fn container_count(&self) -> usize {
        self.state.read().await.containers.len()
    }

    pub async fn find_container(&self, id: &str) -> Option<Container> {
        self.state
            .read()
            .await
            .containers
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub async fn endpoint_id(&self) -> Option<i64> {
        self.session.lock().await.endpoint_id
    }

    pub async fn has_token(&self) -> bool {
        self.session.lock().await.token.is_some()
    }
}
