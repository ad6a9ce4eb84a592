//! boothcfg Egress Connectors
//!
//! This crate provides the connector to the remote event configuration
//! service:
//! - Shared HTTP client construction
//! - `EventsApiConnector`, the HTTP implementation of `ConfigSource`

pub mod client;
pub mod error;
pub mod events_api;

pub use error::{EgressError, Result};
pub use events_api::{EventsApiConfig, EventsApiConnector};
