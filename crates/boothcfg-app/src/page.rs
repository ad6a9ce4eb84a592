//! Page controllers
//!
//! `EventPage` drives the public booth page (`/{tenant_slug}/{event_slug}`):
//! one slug loader plus a provider that republishes its state to the page's
//! subtree. `ShortUrlPage` drives `/e/{event_id}/{event_slug}`: it resolves
//! by numeric ID and sends the caller on to the canonical slug URL.

use boothcfg_core::{ConfigSource, EventConfig, IdKey, SlugKey};
use boothcfg_loader::{
    ContextScope, EventContextValue, EventProvider, IdConfigLoader, LoadState, LoaderSnapshot,
    SlugConfigLoader,
};
use boothcfg_observability::Metrics;
use boothcfg_routing::{Navigator, RedirectOptions};
use std::sync::Arc;
use tracing::{debug, warn};

/// Placeholder tenant segment for events without an owner slug
pub const UNKNOWN_TENANT_SLUG: &str = "unknown";

/// Booth page bound to one tenant/event pair
///
/// Dropping the page stops context updates.
pub struct EventPage {
    loader: Arc<SlugConfigLoader>,
    provider: EventProvider,
    scope: ContextScope,
}

impl EventPage {
    /// Mount the page under `parent` and start resolving
    ///
    /// Must be called from within a Tokio runtime.
    pub fn open(
        source: Arc<dyn ConfigSource>,
        metrics: Option<Metrics>,
        parent: &ContextScope,
        tenant_slug: &str,
        event_slug: &str,
    ) -> Self {
        let mut loader = SlugConfigLoader::new(source);
        if let Some(metrics) = metrics {
            loader = loader.with_metrics(metrics);
        }
        let loader = Arc::new(loader);

        // Key first: the provider's initial snapshot must already be Loading
        loader.set_key(SlugKey::new(tenant_slug, event_slug));
        let provider = EventProvider::follow(loader.as_ref(), tenant_slug, event_slug);

        let scope = parent.provide(&provider);
        Self {
            loader,
            provider,
            scope,
        }
    }

    /// Scope to hand to the page's children
    pub fn scope(&self) -> &ContextScope {
        &self.scope
    }

    pub fn snapshot(&self) -> LoaderSnapshot {
        self.loader.snapshot()
    }

    /// Wait until the published context is no longer loading
    pub async fn settled(&self) -> Arc<EventContextValue> {
        let mut consumer = self.provider.consumer();
        let mut current = self.provider.current();

        while current.is_loading() {
            match consumer.changed().await {
                Some(value) => current = value,
                None => break,
            }
        }

        current
    }
}

/// What the short-URL page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortUrlOutcome {
    Loading,
    NotFound,
    Redirect {
        path: String,
        options: RedirectOptions,
    },
}

/// Short-URL page bound to one raw ID segment and event slug
pub struct ShortUrlPage {
    loader: Arc<IdConfigLoader>,
    query: Option<String>,
}

impl ShortUrlPage {
    /// Mount the page and start resolving
    ///
    /// `raw_event_id` is the path segment as typed; only its leading digits
    /// count. `query` is the current query string, with or without `?`.
    /// Must be called from within a Tokio runtime.
    pub fn open(
        source: Arc<dyn ConfigSource>,
        metrics: Option<Metrics>,
        raw_event_id: &str,
        event_slug: &str,
        query: Option<&str>,
    ) -> Self {
        let mut loader = IdConfigLoader::new(source);
        if let Some(metrics) = metrics {
            loader = loader.with_metrics(metrics);
        }
        let loader = Arc::new(loader);

        let key = IdKey::new(parse_event_id(raw_event_id), Some(event_slug));
        if key.is_none() {
            debug!(raw_event_id, event_slug, "Short URL is missing its event id or slug");
        }
        loader.set_key(key);

        let query = query
            .map(|q| q.trim_start_matches('?'))
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        Self { loader, query }
    }

    /// Outcome for the loader's current state
    pub fn outcome(&self) -> ShortUrlOutcome {
        outcome_for(&self.loader.state(), self.query.as_deref())
    }

    /// Wait for resolution to finish and return the final outcome
    pub async fn resolve(&self) -> ShortUrlOutcome {
        let mut states = self.loader.subscribe();

        loop {
            let state = states.borrow_and_update().clone();
            if !state.is_loading() {
                return outcome_for(&state, self.query.as_deref());
            }
            if states.changed().await.is_err() {
                return self.outcome();
            }
        }
    }

    /// Resolve, then perform the redirect if there is one
    pub async fn follow_through(&self, navigator: &dyn Navigator) -> ShortUrlOutcome {
        let outcome = self.resolve().await;
        if let ShortUrlOutcome::Redirect { path, options } = &outcome {
            debug!(%path, "Redirecting short URL to canonical event page");
            navigator.redirect(path, *options);
        }
        outcome
    }
}

fn outcome_for(state: &LoadState, query: Option<&str>) -> ShortUrlOutcome {
    match state {
        LoadState::Loading => ShortUrlOutcome::Loading,
        LoadState::Loaded(config) => ShortUrlOutcome::Redirect {
            path: canonical_path(config, query),
            options: RedirectOptions::replace(),
        },
        LoadState::Failed(message) => {
            warn!(error = %message, "Short URL did not resolve");
            ShortUrlOutcome::NotFound
        }
        LoadState::Idle => ShortUrlOutcome::NotFound,
    }
}

/// Leading decimal digits of an ID segment
///
/// `"42abc"` reads as 42; a segment without leading digits, or reading as
/// zero, has no ID.
pub fn parse_event_id(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_len = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());

    trimmed[..digits_len].parse::<u64>().ok().filter(|id| *id > 0)
}

/// Canonical `/{tenant_slug}/{event_slug}` path for an event
pub fn canonical_path(config: &EventConfig, query: Option<&str>) -> String {
    let tenant_slug = config
        .user_slug
        .as_deref()
        .filter(|slug| !slug.is_empty())
        .unwrap_or(UNKNOWN_TENANT_SLUG);

    match query.filter(|q| !q.is_empty()) {
        Some(query) => format!("/{}/{}?{}", tenant_slug, config.slug, query),
        None => format!("/{}/{}", tenant_slug, config.slug),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boothcfg_core::Error;

    fn config(user_slug: Option<&str>, slug: &str) -> EventConfig {
        let mut value = serde_json::json!({
            "_id": "evt-1",
            "user_id": "u-1",
            "slug": slug,
            "title": "Launch Party",
        });
        if let Some(user_slug) = user_slug {
            value["user_slug"] = serde_json::json!(user_slug);
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_event_id() {
        assert_eq!(parse_event_id("42"), Some(42));
        assert_eq!(parse_event_id("42abc"), Some(42));
        assert_eq!(parse_event_id(" 7"), Some(7));
        assert_eq!(parse_event_id("abc"), None);
        assert_eq!(parse_event_id(""), None);
        assert_eq!(parse_event_id("0"), None);
        assert_eq!(parse_event_id("-3"), None);
    }

    #[test]
    fn test_canonical_path() {
        let event = config(Some("acme"), "launch-party");
        assert_eq!(canonical_path(&event, None), "/acme/launch-party");
        assert_eq!(
            canonical_path(&event, Some("ref=qr&utm=booth")),
            "/acme/launch-party?ref=qr&utm=booth"
        );
        assert_eq!(canonical_path(&event, Some("")), "/acme/launch-party");
    }

    #[test]
    fn test_canonical_path_without_owner_slug() {
        assert_eq!(canonical_path(&config(None, "gala"), None), "/unknown/gala");
        assert_eq!(canonical_path(&config(Some(""), "gala"), None), "/unknown/gala");
    }

    #[test]
    fn test_outcome_for_states() {
        let loaded = LoadState::Loaded(Arc::new(config(Some("acme"), "launch-party")));

        assert_eq!(outcome_for(&LoadState::Loading, None), ShortUrlOutcome::Loading);
        assert_eq!(outcome_for(&LoadState::Idle, None), ShortUrlOutcome::NotFound);
        assert_eq!(
            outcome_for(&LoadState::Failed(Error::EventNotFound.to_string()), None),
            ShortUrlOutcome::NotFound
        );
        assert_eq!(
            outcome_for(&loaded, Some("x=1")),
            ShortUrlOutcome::Redirect {
                path: "/acme/launch-party?x=1".to_string(),
                options: RedirectOptions { replace: true },
            }
        );
    }
}
