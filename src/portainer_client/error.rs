// Errors from individual Portainer API calls; refresh() logs and absorbs them

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure, timeout, non-2xx status or undecodable body.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("authentication response did not contain a token")]
    MissingToken,
    #[error("failed to build HTTP client: {0}")]
    InvalidClient(#[source] reqwest::Error),
}
