//! Configuration for the summa gRPC channel

use std::time::Duration;

use tonic::transport::Endpoint;

use crate::error::{ClientError, ClientResult};

/// Default summa gRPC endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8082";

/// Configuration for the channel a [`crate::SummaClient`] dials
///
/// Timeouts and limits configured here belong to the channel. The client
/// itself never adds its own timeout on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server URL (e.g., "http://summa:8082")
    pub endpoint: String,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Per-request timeout in seconds (None = no channel deadline)
    pub request_timeout_secs: Option<u64>,

    /// HTTP/2 keep-alive interval in seconds
    pub keep_alive_secs: u64,

    /// Max in-flight requests on the channel
    pub concurrency_limit: Option<usize>,

    /// Max encoded/decoded message size in bytes (None = tonic default)
    pub max_message_bytes: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            keep_alive_secs: 30,
            concurrency_limit: None,
            max_message_bytes: None,
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at `endpoint` with default settings
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Create configuration from environment variables
    ///
    /// # Environment Variables
    ///
    /// - `SUMMA_ENDPOINT`: summa gRPC endpoint
    /// - `SUMMA_CONNECT_TIMEOUT_SECS`: Connection timeout
    /// - `SUMMA_REQUEST_TIMEOUT_SECS`: Per-request channel timeout
    /// - `SUMMA_KEEP_ALIVE_SECS`: Keep-alive interval
    /// - `SUMMA_CONCURRENCY_LIMIT`: Max concurrent requests
    /// - `SUMMA_MAX_MESSAGE_BYTES`: Max message size
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: std::env::var("SUMMA_ENDPOINT").unwrap_or(defaults.endpoint),
            connect_timeout_secs: env_parse("SUMMA_CONNECT_TIMEOUT_SECS")
                .unwrap_or(defaults.connect_timeout_secs),
            request_timeout_secs: env_parse("SUMMA_REQUEST_TIMEOUT_SECS"),
            keep_alive_secs: env_parse("SUMMA_KEEP_ALIVE_SECS").unwrap_or(defaults.keep_alive_secs),
            concurrency_limit: env_parse("SUMMA_CONCURRENCY_LIMIT"),
            max_message_bytes: env_parse("SUMMA_MAX_MESSAGE_BYTES"),
        }
    }

    /// Build the tonic endpoint described by this configuration
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`] if the URL does not parse.
    pub fn endpoint(&self) -> ClientResult<Endpoint> {
        let mut endpoint = Endpoint::from_shared(self.endpoint.clone())
            .map_err(|e| ClientError::InvalidEndpoint(format!("{}: {e}", self.endpoint)))?
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .http2_keep_alive_interval(Duration::from_secs(self.keep_alive_secs))
            .keep_alive_timeout(Duration::from_secs(self.keep_alive_secs))
            .keep_alive_while_idle(true);

        if let Some(secs) = self.request_timeout_secs {
            endpoint = endpoint.timeout(Duration::from_secs(secs));
        }
        if let Some(limit) = self.concurrency_limit {
            endpoint = endpoint.concurrency_limit(limit);
        }
        Ok(endpoint)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
