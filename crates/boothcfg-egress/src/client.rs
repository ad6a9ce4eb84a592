//! reqwest client construction for the events API

use crate::{EgressError, Result};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Idle keep-alive connections are dropped after this long
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Knobs for the client the connector talks through
///
/// One lookup is one request: there are no retries, so `timeout_secs`
/// bounds how long a page can stay in its loading state.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Whole-request budget, connect through body
    pub timeout_secs: u64,

    /// TCP + TLS handshake budget
    pub connect_timeout_secs: u64,

    /// Keep-alive connections kept per configuration host
    pub pool_max_idle_per_host: usize,

    /// Sent as `User-Agent` so the service can tell booth lookups apart
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            pool_max_idle_per_host: 8,
            user_agent: concat!("boothcfg/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpClientConfig {
    /// Defaults with the given request and connect budgets
    pub fn with_timeouts(timeout_secs: u64, connect_timeout_secs: u64) -> Self {
        Self {
            timeout_secs,
            connect_timeout_secs,
            ..Self::default()
        }
    }
}

/// Build the shared client for one connector
pub fn create_client(config: &HttpClientConfig) -> Result<Client> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .user_agent(config.user_agent.as_str())
        .build();

    client.map_err(|e| EgressError::ConfigError(format!("Cannot build events API client: {}", e)))
}
