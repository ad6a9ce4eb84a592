//! Lookup schemes understood by the loader

use async_trait::async_trait;
use boothcfg_core::{ConfigSource, EventConfig, IdKey, Result, SlugKey};
use std::fmt;

/// An identifier scheme for event configuration
///
/// Binds a key type to the `ConfigSource` entry point that resolves it.
#[async_trait]
pub trait EventKey: Clone + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Short scheme name used in logs and metric labels
    const SCHEME: &'static str;

    /// Issue the single resolve call for this key
    async fn resolve(&self, source: &dyn ConfigSource) -> Result<EventConfig>;
}

#[async_trait]
impl EventKey for SlugKey {
    const SCHEME: &'static str = "slug";

    async fn resolve(&self, source: &dyn ConfigSource) -> Result<EventConfig> {
        source
            .resolve_by_slug(self.tenant_slug(), self.event_slug())
            .await
    }
}

#[async_trait]
impl EventKey for IdKey {
    const SCHEME: &'static str = "id";

    async fn resolve(&self, source: &dyn ConfigSource) -> Result<EventConfig> {
        source.resolve_by_id(self.event_id(), self.event_slug()).await
    }
}
