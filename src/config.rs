use crate::portainer_client::ClientOptions;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub instances: Vec<InstanceConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    /// How often every sensor's update() runs.
    #[serde(default = "default_update_interval_secs")]
    pub update_interval_secs: u64,
    /// Client-side cooldown between real refreshes, however often sensors update.
    #[serde(default = "default_min_refresh_interval_secs")]
    pub min_refresh_interval_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// How often to log a poller summary at INFO level.
    #[serde(default = "default_summary_log_interval_secs")]
    pub summary_log_interval_secs: u64,
}

fn default_update_interval_secs() -> u64 {
    30
}

fn default_min_refresh_interval_secs() -> u64 {
    120
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_summary_log_interval_secs() -> u64 {
    300
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            update_interval_secs: default_update_interval_secs(),
            min_refresh_interval_secs: default_min_refresh_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            summary_log_interval_secs: default_summary_log_interval_secs(),
        }
    }
}

impl PollingConfig {
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            min_refresh_interval: Duration::from_secs(self.min_refresh_interval_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

/// One Portainer instance. Fields stay optional at parse time and are checked by
/// [`InstanceConfig::validate`] during setup, so one bad entry does not reject the file.
#[derive(Clone, Default, Deserialize)]
pub struct InstanceConfig {
    pub name: Option<String>,
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// An instance with all required fields present.
#[derive(Clone, PartialEq, Eq)]
pub struct Instance {
    pub name: String,
    pub url: String,
    pub username: String,
    pub password: String,
}

const REDACTED: &str = "***";

impl fmt::Debug for InstanceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceConfig")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .finish()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("instance {field} not provided")]
    MissingField { field: &'static str },
}

impl InstanceConfig {
    pub fn validate(&self) -> Result<Instance, ConfigError> {
        fn required(value: &Option<String>, field: &'static str) -> Result<String, ConfigError> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or(ConfigError::MissingField { field })
        }
        Ok(Instance {
            url: required(&self.url, "url")?,
            username: required(&self.username, "username")?,
            password: required(&self.password, "password")?,
            name: required(&self.name, "name")?,
        })
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            self.polling.update_interval_secs > 0,
            "polling.update_interval_secs must be > 0, got {}",
            self.polling.update_interval_secs
        );
        anyhow::ensure!(
            self.polling.min_refresh_interval_secs > 0,
            "polling.min_refresh_interval_secs must be > 0, got {}",
            self.polling.min_refresh_interval_secs
        );
        anyhow::ensure!(
            self.polling.request_timeout_secs > 0,
            "polling.request_timeout_secs must be > 0, got {}",
            self.polling.request_timeout_secs
        );
        anyhow::ensure!(
            self.polling.summary_log_interval_secs > 0,
            "polling.summary_log_interval_secs must be > 0, got {}",
            self.polling.summary_log_interval_secs
        );
        Ok(())
    }
}
