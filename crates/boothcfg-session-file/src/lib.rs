//! File-based identity cache for boothcfg
//!
//! This crate reads the persisted session record (a JSON export of the
//! browser storage the authentication subsystem writes to) and exposes the
//! signed-in user through the `IdentityProvider` trait.

pub mod file_store;

pub use file_store::{FileSessionStore, AUTH_TOKEN_KEY, CURRENT_USER_KEY, LEGACY_USER_KEY};
