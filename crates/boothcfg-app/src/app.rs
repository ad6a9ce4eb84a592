//! Application wiring
//!
//! `App` owns the shared pieces every page needs: the configuration
//! source, the persisted session, route destinations and metrics. Pages and
//! guards are built from it on demand.

use boothcfg_core::{ConfigSource, IdentityProvider};
use boothcfg_egress::client::HttpClientConfig;
use boothcfg_egress::{EventsApiConfig, EventsApiConnector};
use boothcfg_loader::ContextScope;
use boothcfg_observability::{Metrics, init_logging};
use boothcfg_routing::AccessGuard;
use boothcfg_session_file::FileSessionStore;
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::page::{EventPage, ShortUrlPage};

#[derive(Clone)]
pub struct App {
    config: AppConfig,
    source: Arc<dyn ConfigSource>,
    session: Arc<FileSessionStore>,
    metrics: Metrics,
}

impl App {
    /// Build the HTTP connector and session store from configuration
    ///
    /// # Errors
    /// - `AppError::InvalidConfig` if no API base URL is configured
    /// - `AppError::Connector` if the connector rejects the base URL
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let base_url = config.api.resolved_base_url();
        if base_url.is_empty() {
            return Err(AppError::InvalidConfig(
                "api.base_url is not set (config file or BOOTHCFG_API_URL)".to_string(),
            ));
        }

        let api_config = EventsApiConfig {
            base_url: base_url.clone(),
            client_config: HttpClientConfig::with_timeouts(
                config.api.timeout_secs,
                config.api.connect_timeout_secs,
            ),
        };
        let connector = EventsApiConnector::new(api_config)?;

        info!(%base_url, "Using event configuration service");
        Self::with_source(config, Arc::new(connector))
    }

    /// Wire the application around an existing configuration source
    pub fn with_source(config: AppConfig, source: Arc<dyn ConfigSource>) -> Result<Self> {
        let session = Arc::new(FileSessionStore::new(&config.session.path)?);
        let metrics = Metrics::new()?;

        Ok(Self {
            config,
            source,
            session,
            metrics,
        })
    }

    /// Install the global log subscriber; false if one was already installed
    pub fn init_logging(&self) -> bool {
        init_logging(&self.config.logging)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn session(&self) -> &FileSessionStore {
        &self.session
    }

    pub fn source(&self) -> Arc<dyn ConfigSource> {
        Arc::clone(&self.source)
    }

    fn identity(&self) -> Arc<dyn IdentityProvider> {
        self.session.clone()
    }

    /// Guard for creator routes
    pub fn creator_only(&self) -> AccessGuard {
        AccessGuard::creator_only(self.identity())
            .with_destinations(self.config.routes.clone())
            .with_metrics(self.metrics.clone())
    }

    /// Guard for business dashboard routes
    pub fn business_only(&self) -> AccessGuard {
        AccessGuard::business_only(self.identity())
            .with_destinations(self.config.routes.clone())
            .with_metrics(self.metrics.clone())
    }

    /// Mount a booth page; must be called from within a Tokio runtime
    pub fn event_page(
        &self,
        parent: &ContextScope,
        tenant_slug: &str,
        event_slug: &str,
    ) -> EventPage {
        EventPage::open(
            self.source(),
            Some(self.metrics.clone()),
            parent,
            tenant_slug,
            event_slug,
        )
    }

    /// Mount a short-URL page; must be called from within a Tokio runtime
    pub fn short_url_page(
        &self,
        raw_event_id: &str,
        event_slug: &str,
        query: Option<&str>,
    ) -> ShortUrlPage {
        ShortUrlPage::open(
            self.source(),
            Some(self.metrics.clone()),
            raw_event_id,
            event_slug,
            query,
        )
    }
}
