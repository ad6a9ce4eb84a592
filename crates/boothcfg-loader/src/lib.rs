//! boothcfg Loader
//!
//! This crate turns one-shot configuration lookups into page-lifetime state:
//! - Keyed async resolution with stale-response discard (`ConfigLoader`)
//! - Slug and ID lookup schemes (`SlugConfigLoader`, `IdConfigLoader`)
//! - Snapshot propagation to a UI subtree (`EventProvider`, `EventConsumer`)

pub mod context;
pub mod key;
pub mod loader;

#[cfg(test)]
mod test_support;

pub use context::{ContextScope, EventConsumer, EventContextValue, EventProvider};
pub use key::EventKey;
pub use loader::{
    ConfigLoader, FALLBACK_ERROR_MESSAGE, IdConfigLoader, LoadState, LoaderSnapshot,
    SlugConfigLoader,
};
