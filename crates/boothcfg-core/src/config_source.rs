//! Configuration source trait
//!
//! The `ConfigSource` trait abstracts the remote configuration service so
//! loaders can be driven by the HTTP connector in production and by fakes
//! in tests.

use async_trait::async_trait;

use crate::{EventConfig, Result};

/// Resolves event configuration by one of two identifier schemes
///
/// Each call performs exactly one request. Callers are responsible for
/// passing non-empty slugs and a positive event ID; implementations do not
/// re-validate them.
///
/// # Example
/// ```no_run
/// # use boothcfg_core::ConfigSource;
/// # async fn example(source: &dyn ConfigSource) -> boothcfg_core::Result<()> {
/// let config = source.resolve_by_slug("acme", "launch-party").await?;
/// let same = source.resolve_by_id(42, "launch-party").await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Resolve by tenant slug and event slug
    ///
    /// # Errors
    /// - `Error::EventNotFound` if the service has no such event
    /// - `Error::Http` for other non-success statuses
    /// - `Error::Transport` / `Error::Timeout` for network failures
    /// - `Error::Parse` if the body is not a valid configuration
    async fn resolve_by_slug(&self, tenant_slug: &str, event_slug: &str) -> Result<EventConfig>;

    /// Resolve by numeric event ID and event slug
    ///
    /// Fails the same way as `resolve_by_slug`.
    async fn resolve_by_id(&self, event_id: u64, event_slug: &str) -> Result<EventConfig>;
}
