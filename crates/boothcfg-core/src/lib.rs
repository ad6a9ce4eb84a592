//! boothcfg Core Types and Traits
//!
//! This crate provides the fundamental types and traits used throughout boothcfg:
//! - Event configuration model and lookup keys
//! - Identity and role types
//! - The `ConfigSource` and `IdentityProvider` seams
//! - Core error types

pub mod config_source;
pub mod error;
pub mod event;
pub mod identity;

pub use config_source::ConfigSource;
pub use error::{Error, Result};
pub use event::{EventConfig, IdKey, SlugKey};
pub use identity::{Identity, IdentityProvider, Role, StaticIdentityProvider};
