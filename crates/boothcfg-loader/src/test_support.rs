//! Fakes shared by the loader and context tests

use async_trait::async_trait;
use boothcfg_core::{ConfigSource, Error, EventConfig, Result};
use mockall::mock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

mock! {
    pub Source {}

    #[async_trait]
    impl ConfigSource for Source {
        async fn resolve_by_slug(&self, tenant_slug: &str, event_slug: &str) -> Result<EventConfig>;
        async fn resolve_by_id(&self, event_id: u64, event_slug: &str) -> Result<EventConfig>;
    }
}

pub fn sample_config(event_slug: &str) -> EventConfig {
    serde_json::from_value(serde_json::json!({
        "_id": format!("evt-{}", event_slug),
        "user_id": "u-1",
        "user_slug": "acme",
        "slug": event_slug,
        "title": format!("Event {}", event_slug),
    }))
    .unwrap()
}

/// Source whose responses are held until the test releases them
///
/// Gates are keyed by event slug. Slugs starting with `fail` resolve to an
/// error instead of a configuration.
#[derive(Default)]
pub struct GatedSource {
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: AtomicUsize,
}

impl GatedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn gate(&self, event_slug: &str) -> Arc<Notify> {
        self.gates
            .lock()
            .unwrap()
            .entry(event_slug.to_string())
            .or_default()
            .clone()
    }

    /// Let the pending (or next) request for this slug complete
    pub fn release(&self, event_slug: &str) {
        self.gate(event_slug).notify_one();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn respond(&self, event_slug: &str) -> Result<EventConfig> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate(event_slug).notified().await;

        if event_slug.starts_with("fail") {
            Err(Error::Transport(format!("upstream rejected {}", event_slug)))
        } else {
            Ok(sample_config(event_slug))
        }
    }
}

#[async_trait]
impl ConfigSource for GatedSource {
    async fn resolve_by_slug(&self, _tenant_slug: &str, event_slug: &str) -> Result<EventConfig> {
        self.respond(event_slug).await
    }

    async fn resolve_by_id(&self, _event_id: u64, event_slug: &str) -> Result<EventConfig> {
        self.respond(event_slug).await
    }
}
