//! Access Guard
//!
//! A guard sits at the entry of a route and decides, from the cached
//! identity alone, whether to render the route or send the caller
//! somewhere else. Decisions are synchronous, stateless and idempotent:
//! the same identity always yields the same decision.
//!
//! Policies:
//! - CreatorOnly: routes for individual creators. Active business accounts
//!   go to the business home, the super-admin goes to the admin area,
//!   everybody else (including anonymous callers) gets the route.
//! - BusinessOnly: routes for approved business accounts. The super-admin
//!   goes to the admin area, anyone not an approved business goes to sign-in.

use boothcfg_core::{Identity, IdentityProvider};
use boothcfg_observability::Metrics;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::navigator::{Navigator, RedirectOptions};

/// Which callers a guarded route admits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardPolicy {
    CreatorOnly,
    BusinessOnly,
}

impl GuardPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuardPolicy::CreatorOnly => "creator_only",
            GuardPolicy::BusinessOnly => "business_only",
        }
    }
}

/// Where guards send callers they turn away
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardDestinations {
    #[serde(default = "default_business_home")]
    pub business_home: String,

    #[serde(default = "default_super_admin")]
    pub super_admin: String,

    #[serde(default = "default_sign_in")]
    pub sign_in: String,
}

impl Default for GuardDestinations {
    fn default() -> Self {
        Self {
            business_home: default_business_home(),
            super_admin: default_super_admin(),
            sign_in: default_sign_in(),
        }
    }
}

fn default_business_home() -> String {
    "/admin/home".to_string()
}

fn default_super_admin() -> String {
    "/super-admin".to_string()
}

fn default_sign_in() -> String {
    "/auth".to_string()
}

/// Outcome of one guard evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the guarded subtree unchanged
    Render,
    /// Leave for another route
    Redirect {
        path: String,
        options: RedirectOptions,
    },
}

impl GuardDecision {
    fn redirect(path: &str) -> Self {
        GuardDecision::Redirect {
            path: path.to_string(),
            options: RedirectOptions::replace(),
        }
    }

    pub fn is_render(&self) -> bool {
        matches!(self, GuardDecision::Render)
    }

    /// Redirect target, if any
    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            GuardDecision::Render => None,
            GuardDecision::Redirect { path, .. } => Some(path),
        }
    }
}

/// Decide for a given identity snapshot
pub fn decide(
    policy: GuardPolicy,
    identity: Option<&Identity>,
    destinations: &GuardDestinations,
) -> GuardDecision {
    let role = identity.and_then(|identity| identity.role.as_ref());

    match policy {
        GuardPolicy::CreatorOnly => {
            // Signed-in enforcement belongs to the authentication layer
            let Some(identity) = identity else {
                return GuardDecision::Render;
            };

            match &identity.role {
                Some(role) if role.is_active_business() => {
                    GuardDecision::redirect(&destinations.business_home)
                }
                Some(role) if role.is_superadmin() => {
                    GuardDecision::redirect(&destinations.super_admin)
                }
                Some(role) => {
                    // Unrecognized tags are treated as ordinary users
                    debug!(role = %role, "Role not business or super-admin, allowing route");
                    GuardDecision::Render
                }
                None => GuardDecision::Render,
            }
        }
        GuardPolicy::BusinessOnly => match role {
            Some(role) if role.is_superadmin() => {
                GuardDecision::redirect(&destinations.super_admin)
            }
            Some(role) if role.is_active_business() => GuardDecision::Render,
            _ => GuardDecision::redirect(&destinations.sign_in),
        },
    }
}

/// Route guard bound to an identity source
pub struct AccessGuard {
    identity: Arc<dyn IdentityProvider>,
    policy: GuardPolicy,
    destinations: GuardDestinations,
    metrics: Option<Metrics>,
}

impl AccessGuard {
    pub fn new(identity: Arc<dyn IdentityProvider>, policy: GuardPolicy) -> Self {
        Self {
            identity,
            policy,
            destinations: GuardDestinations::default(),
            metrics: None,
        }
    }

    pub fn creator_only(identity: Arc<dyn IdentityProvider>) -> Self {
        Self::new(identity, GuardPolicy::CreatorOnly)
    }

    pub fn business_only(identity: Arc<dyn IdentityProvider>) -> Self {
        Self::new(identity, GuardPolicy::BusinessOnly)
    }

    pub fn with_destinations(mut self, destinations: GuardDestinations) -> Self {
        self.destinations = destinations;
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn policy(&self) -> GuardPolicy {
        self.policy
    }

    /// Read the identity now and decide
    pub fn evaluate(&self) -> GuardDecision {
        let identity = self.identity.current_identity();
        let decision = decide(self.policy, identity.as_ref(), &self.destinations);

        if let Some(metrics) = &self.metrics {
            let outcome = if decision.is_render() { "render" } else { "redirect" };
            metrics.record_guard_decision(self.policy.as_str(), outcome);
        }

        decision
    }

    /// Evaluate and act: render the subtree, or redirect and render nothing
    pub fn enter<T>(&self, navigator: &dyn Navigator, render: impl FnOnce() -> T) -> Option<T> {
        match self.evaluate() {
            GuardDecision::Render => Some(render()),
            GuardDecision::Redirect { path, options } => {
                debug!(policy = self.policy.as_str(), %path, "Guard redirecting");
                navigator.redirect(&path, options);
                None
            }
        }
    }
}
