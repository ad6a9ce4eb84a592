//! Metrics collection with Prometheus
//!
//! This module provides Prometheus metrics for boothcfg:
//! - Configuration resolutions by identifier scheme and outcome
//! - Stale responses discarded by loaders
//! - Resolution latency
//! - Access guard decisions

use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Metrics collector for boothcfg
#[derive(Clone)]
pub struct Metrics {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Completed resolutions (outcome = loaded | failed)
    pub resolutions_total: CounterVec,
    /// Responses that arrived after their key was superseded
    pub stale_responses_total: CounterVec,
    /// Time from issuing a resolve call to its completion
    pub resolve_duration_seconds: HistogramVec,
    /// Access guard decisions (decision = render | redirect)
    pub guard_decisions_total: CounterVec,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let resolutions_total = CounterVec::new(
            Opts::new(
                "boothcfg_resolutions_total",
                "Total number of completed configuration resolutions",
            ),
            &["scheme", "outcome"],
        )?;

        let stale_responses_total = CounterVec::new(
            Opts::new(
                "boothcfg_stale_responses_total",
                "Resolutions discarded because a newer key superseded them",
            ),
            &["scheme"],
        )?;

        let resolve_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "boothcfg_resolve_duration_seconds",
                "Configuration resolution duration in seconds",
            )
            .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["scheme"],
        )?;

        let guard_decisions_total = CounterVec::new(
            Opts::new(
                "boothcfg_guard_decisions_total",
                "Access guard decisions",
            ),
            &["policy", "decision"],
        )?;

        registry.register(Box::new(resolutions_total.clone()))?;
        registry.register(Box::new(stale_responses_total.clone()))?;
        registry.register(Box::new(resolve_duration_seconds.clone()))?;
        registry.register(Box::new(guard_decisions_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            resolutions_total,
            stale_responses_total,
            resolve_duration_seconds,
            guard_decisions_total,
        })
    }

    /// Get the Prometheus registry for exporting metrics
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record a resolution that reached a terminal state
    pub fn record_resolution(&self, scheme: &str, outcome: &str, duration_secs: f64) {
        self.resolutions_total
            .with_label_values(&[scheme, outcome])
            .inc();
        self.resolve_duration_seconds
            .with_label_values(&[scheme])
            .observe(duration_secs);
    }

    /// Record a late response that was dropped
    pub fn record_stale_response(&self, scheme: &str) {
        self.stale_responses_total.with_label_values(&[scheme]).inc();
    }

    /// Record an access guard decision
    pub fn record_guard_decision(&self, policy: &str, decision: &str) {
        self.guard_decisions_total
            .with_label_values(&[policy, decision])
            .inc();
    }

    /// Render all metrics in the Prometheus text exposition format
    pub fn gather_text(&self) -> Result<String, prometheus::Error> {
        TextEncoder::new().encode_to_string(&self.registry.gather())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        // Vec metrics only show up once a label set has been touched
        metrics.record_stale_response("slug");
        assert!(!metrics.registry().gather().is_empty());
    }

    #[test]
    fn test_record_resolution() {
        let metrics = Metrics::new().unwrap();
        metrics.record_resolution("slug", "loaded", 0.12);
        metrics.record_resolution("slug", "loaded", 0.08);
        metrics.record_resolution("id", "failed", 0.5);

        assert_eq!(
            metrics
                .resolutions_total
                .with_label_values(&["slug", "loaded"])
                .get(),
            2.0
        );
        assert_eq!(
            metrics
                .resolutions_total
                .with_label_values(&["id", "failed"])
                .get(),
            1.0
        );
        assert_eq!(
            metrics
                .resolve_duration_seconds
                .with_label_values(&["slug"])
                .get_sample_count(),
            2
        );
    }

    #[test]
    fn test_record_guard_decision() {
        let metrics = Metrics::new().unwrap();
        metrics.record_guard_decision("creator_only", "redirect");

        assert_eq!(
            metrics
                .guard_decisions_total
                .with_label_values(&["creator_only", "redirect"])
                .get(),
            1.0
        );
    }

    #[test]
    fn test_gather_text() {
        let metrics = Metrics::new().unwrap();
        metrics.record_stale_response("id");

        let text = metrics.gather_text().unwrap();
        assert!(text.contains("boothcfg_stale_responses_total"));
        assert!(text.contains("scheme=\"id\""));
    }
}
