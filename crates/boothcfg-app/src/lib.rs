//! boothcfg Application
//!
//! Ties the workspace together for a host application:
//! - Settings from YAML/TOML files and `BOOTHCFG_*` environment variables
//! - Connector, session store, guards and metrics built from those settings
//! - Booth page and short-URL page controllers

pub mod app;
pub mod config;
pub mod error;
pub mod page;

pub use app::App;
pub use config::{ApiConfig, AppConfig, SessionConfig, enforce_https};
pub use error::{AppError, Result};
pub use page::{EventPage, ShortUrlOutcome, ShortUrlPage, canonical_path, parse_event_id};
