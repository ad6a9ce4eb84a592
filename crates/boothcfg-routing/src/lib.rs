//! boothcfg Routing
//!
//! This crate provides role-based gating of UI routes:
//! - Guard policies and their decisions
//! - Redirect destinations
//! - The `Navigator` seam used to carry out redirects

pub mod guard;
pub mod navigator;

// Re-export commonly used types
pub use guard::{AccessGuard, GuardDecision, GuardDestinations, GuardPolicy};
pub use navigator::{Navigator, RedirectOptions};
