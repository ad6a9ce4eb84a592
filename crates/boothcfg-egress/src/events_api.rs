//! Events API connector

use crate::{
    client::{create_client, HttpClientConfig},
    EgressError, Result,
};
use async_trait::async_trait;
use boothcfg_core::{ConfigSource, EventConfig};
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, instrument, warn};

/// Events API connector configuration
#[derive(Debug, Clone)]
pub struct EventsApiConfig {
    /// Base URL of the configuration service (e.g. https://api.example.com)
    pub base_url: String,

    /// HTTP client configuration
    pub client_config: HttpClientConfig,
}

impl EventsApiConfig {
    /// Create a new connector configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client_config: HttpClientConfig::default(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.client_config.timeout_secs = timeout_secs;
        self
    }
}

/// HTTP connector to the event configuration service
pub struct EventsApiConnector {
    base_url: Url,
    timeout_secs: u64,
    client: Client,
}

impl EventsApiConnector {
    /// Create a new connector
    ///
    /// # Errors
    /// - `EgressError::ConfigError` if the base URL is empty or not absolute
    pub fn new(config: EventsApiConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(EgressError::ConfigError(
                "Events API base URL is empty".to_string(),
            ));
        }

        let base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            EgressError::ConfigError(format!("Invalid base URL {:?}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(EgressError::ConfigError(format!(
                "Base URL {:?} cannot carry a path",
                config.base_url
            )));
        }

        let client = create_client(&config.client_config)?;
        Ok(Self {
            base_url,
            timeout_secs: config.client_config.timeout_secs,
            client,
        })
    }

    /// URL for `/api/events/{tenant_slug}/{event_slug}`
    pub fn slug_url(&self, tenant_slug: &str, event_slug: &str) -> Result<Url> {
        self.endpoint(&["api", "events", tenant_slug, event_slug])
    }

    /// URL for `/api/events/by-id/{event_id}/{event_slug}`
    pub fn id_url(&self, event_id: u64, event_slug: &str) -> Result<Url> {
        let event_id = event_id.to_string();
        self.endpoint(&["api", "events", "by-id", &event_id, event_slug])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| EgressError::ConfigError("Base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issue one GET and decode the configuration
    async fn fetch(&self, url: Url) -> Result<EventConfig> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                EgressError::Timeout(self.timeout_secs)
            } else {
                EgressError::HttpError(e)
            }
        })?;

        self.handle_response(response).await
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<EventConfig> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(EgressError::NotFound);
        }

        if !status.is_success() {
            let reason = status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string();
            warn!("Events API returned {}", status);
            return Err(EgressError::ServiceError {
                status_code: status.as_u16(),
                reason,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<EventConfig>(&body)
            .map_err(|e| EgressError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl ConfigSource for EventsApiConnector {
    #[instrument(skip(self))]
    async fn resolve_by_slug(
        &self,
        tenant_slug: &str,
        event_slug: &str,
    ) -> boothcfg_core::Result<EventConfig> {
        let url = self.slug_url(tenant_slug, event_slug)?;
        Ok(self.fetch(url).await?)
    }

    #[instrument(skip(self))]
    async fn resolve_by_id(
        &self,
        event_id: u64,
        event_slug: &str,
    ) -> boothcfg_core::Result<EventConfig> {
        let url = self.id_url(event_id, event_slug)?;
        Ok(self.fetch(url).await?)
    }
}
