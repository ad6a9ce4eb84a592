//! Keyed async configuration loader
//!
//! A `ConfigLoader` owns the lifecycle of one page's configuration:
//! - Idle: no key, or the key is incomplete
//! - Loading: a resolve call for the current key is in flight
//! - Loaded / Failed: terminal until the key changes
//!
//! State transitions:
//! - any → Idle: key cleared
//! - any → Loading: key changed to a new complete key
//! - Loading → Loaded | Failed: the call for the *current* key completed
//!
//! Every key change bumps a generation counter. A completion carrying an
//! older generation is dropped, so a slow response for a superseded key can
//! never overwrite the state of the key on screen.

use boothcfg_core::{ConfigSource, Error, EventConfig, IdKey, SlugKey};
use boothcfg_observability::Metrics;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::key::EventKey;

/// Message recorded when a failure carries no message of its own
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to load event";

/// Loader lifecycle state
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded(Arc<EventConfig>),
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn config(&self) -> Option<&Arc<EventConfig>> {
        match self {
            LoadState::Loaded(config) => Some(config),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// The `{config, loading, error}` view of a `LoadState`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoaderSnapshot {
    pub config: Option<Arc<EventConfig>>,
    pub loading: bool,
    pub error: Option<String>,
}

impl From<&LoadState> for LoaderSnapshot {
    fn from(state: &LoadState) -> Self {
        Self {
            config: state.config().cloned(),
            loading: state.is_loading(),
            error: state.error().map(str::to_string),
        }
    }
}

/// Turn a resolution error into the message shown to the user
fn failure_message(err: &Error) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

struct KeyState<K> {
    key: Option<K>,
    generation: u64,
}

/// A resolve call issued for one key generation
struct Resolution<K> {
    key: K,
    generation: u64,
}

/// Loader keyed by tenant slug + event slug
pub type SlugConfigLoader = ConfigLoader<SlugKey>;

/// Loader keyed by event ID + event slug
pub type IdConfigLoader = ConfigLoader<IdKey>;

/// Keyed async resolution with stale-response discard
///
/// Thread-safe; share it behind an `Arc` to trigger loads with `set_key`.
pub struct ConfigLoader<K: EventKey> {
    source: Arc<dyn ConfigSource>,
    key_state: Mutex<KeyState<K>>,
    state: watch::Sender<LoadState>,
    metrics: Option<Metrics>,
}

impl<K: EventKey> ConfigLoader<K> {
    /// Create an idle loader
    pub fn new(source: Arc<dyn ConfigSource>) -> Self {
        let (state, _) = watch::channel(LoadState::Idle);
        Self {
            source,
            key_state: Mutex::new(KeyState {
                key: None,
                generation: 0,
            }),
            state,
            metrics: None,
        }
    }

    /// Record resolutions in the given metrics collector
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Current state
    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Current state as `{config, loading, error}`
    pub fn snapshot(&self) -> LoaderSnapshot {
        LoaderSnapshot::from(&*self.state.borrow())
    }

    /// Key currently in effect
    pub fn key(&self) -> Option<K> {
        self.lock_key_state().key.clone()
    }

    /// Watch state changes
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Change the key and resolve it on a background task
    ///
    /// Returns the handle of the spawned resolution, or `None` when no call
    /// was needed (key unchanged, or cleared). Must be called from within a
    /// Tokio runtime.
    pub fn set_key(self: &Arc<Self>, key: Option<K>) -> Option<JoinHandle<()>> {
        let resolution = self.begin(key)?;
        let loader = Arc::clone(self);
        Some(tokio::spawn(async move {
            loader.run(resolution).await;
        }))
    }

    /// Change the key and resolve it inline
    ///
    /// Returns the state once this call's resolution has finished. If a
    /// newer key was set in the meantime, that key's state is returned.
    pub async fn load(&self, key: Option<K>) -> LoadState {
        if let Some(resolution) = self.begin(key) {
            self.run(resolution).await;
        }
        self.state()
    }

    fn lock_key_state(&self) -> std::sync::MutexGuard<'_, KeyState<K>> {
        self.key_state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Apply a key change; returns the resolution to run, if any
    fn begin(&self, key: Option<K>) -> Option<Resolution<K>> {
        let mut key_state = self.lock_key_state();

        if key_state.key == key {
            return None;
        }

        key_state.generation += 1;
        key_state.key = key.clone();
        let generation = key_state.generation;

        match key {
            None => {
                debug!(scheme = K::SCHEME, "Event key cleared, loader idle");
                self.state.send_replace(LoadState::Idle);
                None
            }
            Some(key) => {
                self.state.send_replace(LoadState::Loading);
                Some(Resolution { key, generation })
            }
        }
    }

    async fn run(&self, resolution: Resolution<K>) {
        debug!(scheme = K::SCHEME, key = %resolution.key, "Resolving event configuration");

        let started = Instant::now();
        let result = resolution.key.resolve(self.source.as_ref()).await;
        self.complete(resolution, result, started.elapsed());
    }

    fn complete(
        &self,
        resolution: Resolution<K>,
        result: boothcfg_core::Result<EventConfig>,
        elapsed: Duration,
    ) {
        let key_state = self.lock_key_state();

        if key_state.generation != resolution.generation {
            debug!(
                scheme = K::SCHEME,
                key = %resolution.key,
                "Discarding stale event configuration response"
            );
            if let Some(metrics) = &self.metrics {
                metrics.record_stale_response(K::SCHEME);
            }
            return;
        }

        let (next, outcome) = match result {
            Ok(config) => {
                info!(
                    scheme = K::SCHEME,
                    key = %resolution.key,
                    title = %config.title,
                    "Event configuration loaded"
                );
                (LoadState::Loaded(Arc::new(config)), "loaded")
            }
            Err(e) => {
                error!(
                    scheme = K::SCHEME,
                    key = %resolution.key,
                    error = ?e,
                    "Failed to load event configuration"
                );
                (LoadState::Failed(failure_message(&e)), "failed")
            }
        };

        if let Some(metrics) = &self.metrics {
            metrics.record_resolution(K::SCHEME, outcome, elapsed.as_secs_f64());
        }

        // Published under the key lock so a concurrent key change cannot interleave
        self.state.send_replace(next);
        drop(key_state);
    }
}
