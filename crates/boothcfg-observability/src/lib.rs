//! boothcfg Observability
//!
//! This crate provides observability features:
//! - Structured logging setup
//! - Metrics collection (Prometheus)

pub mod logging;
pub mod metrics;

pub use logging::{LoggingConfig, init_logging};
pub use metrics::Metrics;
