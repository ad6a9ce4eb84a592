//! Event context propagation
//!
//! An `EventProvider` publishes immutable `EventContextValue` snapshots;
//! any number of `EventConsumer`s read the latest one. Each publish swaps a
//! whole `Arc`, so a reader sees either the previous snapshot or the next
//! one, never a mix of both.
//!
//! There is no ambient context: a `ContextScope` is handed down explicitly
//! and a child scope created under a provider shadows outer providers.

use boothcfg_core::EventConfig;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::key::EventKey;
use crate::loader::{ConfigLoader, LoadState};

/// What descendants of a provider see
///
/// Exactly one of loading, failed, loaded or idle holds; the constructors
/// are the only way to build a value.
#[derive(Debug, Clone, PartialEq)]
pub struct EventContextValue {
    config: Option<Arc<EventConfig>>,
    tenant_slug: String,
    event_slug: String,
    loading: bool,
    error: Option<String>,
}

impl EventContextValue {
    pub fn idle(tenant_slug: impl Into<String>, event_slug: impl Into<String>) -> Self {
        Self {
            config: None,
            tenant_slug: tenant_slug.into(),
            event_slug: event_slug.into(),
            loading: false,
            error: None,
        }
    }

    pub fn loading(tenant_slug: impl Into<String>, event_slug: impl Into<String>) -> Self {
        Self {
            loading: true,
            ..Self::idle(tenant_slug, event_slug)
        }
    }

    pub fn loaded(
        tenant_slug: impl Into<String>,
        event_slug: impl Into<String>,
        config: Arc<EventConfig>,
    ) -> Self {
        Self {
            config: Some(config),
            ..Self::idle(tenant_slug, event_slug)
        }
    }

    pub fn failed(
        tenant_slug: impl Into<String>,
        event_slug: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::idle(tenant_slug, event_slug)
        }
    }

    /// Value mirroring a loader state
    pub fn from_state(
        tenant_slug: impl Into<String>,
        event_slug: impl Into<String>,
        state: &LoadState,
    ) -> Self {
        match state {
            LoadState::Idle => Self::idle(tenant_slug, event_slug),
            LoadState::Loading => Self::loading(tenant_slug, event_slug),
            LoadState::Loaded(config) => Self::loaded(tenant_slug, event_slug, config.clone()),
            LoadState::Failed(message) => Self::failed(tenant_slug, event_slug, message.clone()),
        }
    }

    pub fn config(&self) -> Option<&Arc<EventConfig>> {
        self.config.as_ref()
    }

    pub fn tenant_slug(&self) -> &str {
        &self.tenant_slug
    }

    pub fn event_slug(&self) -> &str {
        &self.event_slug
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Publishes context snapshots to its consumers
pub struct EventProvider {
    sender: Arc<watch::Sender<Arc<EventContextValue>>>,
    follower: Option<JoinHandle<()>>,
}

impl EventProvider {
    pub fn new(initial: EventContextValue) -> Self {
        let (sender, _) = watch::channel(Arc::new(initial));
        Self {
            sender: Arc::new(sender),
            follower: None,
        }
    }

    /// Provider that republishes every state change of `loader`
    ///
    /// Republishing stops when the provider is dropped. Must be called from
    /// within a Tokio runtime.
    pub fn follow<K: EventKey>(
        loader: &ConfigLoader<K>,
        tenant_slug: impl Into<String>,
        event_slug: impl Into<String>,
    ) -> Self {
        let tenant_slug = tenant_slug.into();
        let event_slug = event_slug.into();

        // Subscribe before reading so no transition falls between the two
        let mut states = loader.subscribe();
        let initial = {
            let state = states.borrow_and_update();
            EventContextValue::from_state(tenant_slug.clone(), event_slug.clone(), &state)
        };

        let mut provider = Self::new(initial);
        let sender = Arc::clone(&provider.sender);

        provider.follower = Some(tokio::spawn(async move {
            while states.changed().await.is_ok() {
                let value = {
                    let state = states.borrow_and_update();
                    EventContextValue::from_state(tenant_slug.clone(), event_slug.clone(), &state)
                };
                sender.send_replace(Arc::new(value));
            }
            debug!(%tenant_slug, %event_slug, "Loader gone, event context no longer updated");
        }));

        provider
    }

    /// Replace the published snapshot
    pub fn publish(&self, value: EventContextValue) {
        self.sender.send_replace(Arc::new(value));
    }

    /// Latest published snapshot
    pub fn current(&self) -> Arc<EventContextValue> {
        self.sender.borrow().clone()
    }

    pub fn consumer(&self) -> EventConsumer {
        EventConsumer {
            receiver: Some(self.sender.subscribe()),
        }
    }
}

impl Drop for EventProvider {
    fn drop(&mut self) {
        if let Some(follower) = self.follower.take() {
            follower.abort();
        }
    }
}

/// Read side of an `EventProvider`
///
/// A detached consumer (no enclosing provider) reads `None`; that is not an
/// error.
#[derive(Debug, Clone, Default)]
pub struct EventConsumer {
    receiver: Option<watch::Receiver<Arc<EventContextValue>>>,
}

impl EventConsumer {
    pub fn detached() -> Self {
        Self { receiver: None }
    }

    pub fn is_attached(&self) -> bool {
        self.receiver.is_some()
    }

    /// Latest snapshot, `None` outside any provider
    pub fn get(&self) -> Option<Arc<EventContextValue>> {
        self.receiver.as_ref().map(|rx| rx.borrow().clone())
    }

    /// Wait for the next publish and return it
    ///
    /// Returns `None` when detached or once the provider is gone.
    pub async fn changed(&mut self) -> Option<Arc<EventContextValue>> {
        let rx = self.receiver.as_mut()?;
        rx.changed().await.ok()?;
        let value = rx.borrow_and_update().clone();
        Some(value)
    }
}

/// Explicitly passed context for a UI subtree
#[derive(Debug, Clone, Default)]
pub struct ContextScope {
    event: EventConsumer,
}

impl ContextScope {
    /// Scope with no provider
    pub fn root() -> Self {
        Self::default()
    }

    /// Child scope whose nearest provider is `provider`
    pub fn provide(&self, provider: &EventProvider) -> Self {
        Self {
            event: provider.consumer(),
        }
    }

    /// Nearest published event context, `None` outside any provider
    pub fn event_context(&self) -> Option<Arc<EventContextValue>> {
        self.event.get()
    }

    pub fn event_consumer(&self) -> EventConsumer {
        self.event.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::SlugConfigLoader;
    use crate::test_support::{GatedSource, sample_config};
    use boothcfg_core::SlugKey;
    use std::time::Duration;

    #[test]
    fn test_value_invariants() {
        let loading = EventContextValue::loading("acme", "launch-party");
        assert!(loading.is_loading());
        assert!(loading.config().is_none() && loading.error().is_none());

        let failed = EventContextValue::failed("acme", "launch-party", "Event not found");
        assert!(!failed.is_loading());
        assert!(failed.config().is_none());
        assert_eq!(failed.error(), Some("Event not found"));

        let loaded = EventContextValue::loaded(
            "acme",
            "launch-party",
            Arc::new(sample_config("launch-party")),
        );
        assert!(!loaded.is_loading());
        assert!(loaded.error().is_none());
        assert_eq!(loaded.config().unwrap().slug, "launch-party");
        assert_eq!(loaded.tenant_slug(), "acme");
        assert_eq!(loaded.event_slug(), "launch-party");
    }

    #[test]
    fn test_detached_consumer_reads_none() {
        let consumer = EventConsumer::detached();
        assert!(!consumer.is_attached());
        assert!(consumer.get().is_none());
        assert!(ContextScope::root().event_context().is_none());
    }

    #[test]
    fn test_all_consumers_share_one_snapshot() {
        let provider = EventProvider::new(EventContextValue::loading("acme", "launch-party"));
        let a = provider.consumer();
        let b = provider.consumer();

        provider.publish(EventContextValue::loaded(
            "acme",
            "launch-party",
            Arc::new(sample_config("launch-party")),
        ));

        let seen_a = a.get().unwrap();
        let seen_b = b.get().unwrap();
        assert!(Arc::ptr_eq(&seen_a, &seen_b));
        assert!(Arc::ptr_eq(&seen_a, &provider.current()));
    }

    #[test]
    fn test_rereading_without_publish_is_stable() {
        let provider = EventProvider::new(EventContextValue::idle("acme", "launch-party"));
        let consumer = provider.consumer();

        let first = consumer.get().unwrap();
        let second = consumer.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_inner_provider_shadows_outer() {
        let outer = EventProvider::new(EventContextValue::idle("acme", "outer"));
        let inner = EventProvider::new(EventContextValue::idle("acme", "inner"));

        let root = ContextScope::root();
        let page = root.provide(&outer);
        let section = page.provide(&inner);

        assert_eq!(page.event_context().unwrap().event_slug(), "outer");
        assert_eq!(section.event_context().unwrap().event_slug(), "inner");
        assert!(root.event_context().is_none());
    }

    #[tokio::test]
    async fn test_changed_wakes_on_publish() {
        let provider = EventProvider::new(EventContextValue::loading("acme", "launch-party"));
        let mut consumer = provider.consumer();

        provider.publish(EventContextValue::failed("acme", "launch-party", "boom"));

        let value = consumer.changed().await.unwrap();
        assert_eq!(value.error(), Some("boom"));
    }

    #[tokio::test]
    async fn test_changed_ends_when_provider_dropped() {
        let provider = EventProvider::new(EventContextValue::idle("acme", "launch-party"));
        let mut consumer = provider.consumer();
        drop(provider);

        assert!(consumer.changed().await.is_none());
        assert!(EventConsumer::detached().changed().await.is_none());
    }

    #[tokio::test]
    async fn test_follow_republishes_loader_states() {
        let source = GatedSource::new();
        let loader = Arc::new(SlugConfigLoader::new(source.clone()));
        let provider = EventProvider::follow(loader.as_ref(), "acme", "launch-party");
        let mut consumer = provider.consumer();

        assert!(!consumer.get().unwrap().is_loading());

        let handle = loader.set_key(SlugKey::new("acme", "launch-party")).unwrap();
        let value = consumer.changed().await.unwrap();
        assert!(value.is_loading());

        source.release("launch-party");
        handle.await.unwrap();

        let value = tokio::time::timeout(Duration::from_secs(1), async {
            loop {
                let value = consumer.changed().await.unwrap();
                if !value.is_loading() {
                    return value;
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(value.config().unwrap().slug, "launch-party");
        assert!(value.error().is_none());
        assert_eq!(value.tenant_slug(), "acme");
    }
}
