//! Identity and role types
//!
//! The identity is a snapshot of the currently authenticated caller as the
//! authentication subsystem persisted it. Nothing in boothcfg mutates it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role tag prefix shared by all business-tenant roles
pub const BUSINESS_ROLE_PREFIX: &str = "business";

/// Business role that has signed up but not been approved yet
pub const BUSINESS_PENDING_ROLE: &str = "business_pending";

pub const SUPERADMIN_ROLE: &str = "superadmin";

/// Role label attached to an identity
///
/// Stored verbatim: unknown tags are preserved rather than rejected, and
/// classified by the predicates below.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Any business-tenant role, pending or not
    pub fn is_business(&self) -> bool {
        self.0.starts_with(BUSINESS_ROLE_PREFIX)
    }

    pub fn is_business_pending(&self) -> bool {
        self.0 == BUSINESS_PENDING_ROLE
    }

    /// A business role that has been approved
    pub fn is_active_business(&self) -> bool {
        self.is_business() && !self.is_business_pending()
    }

    pub fn is_superadmin(&self) -> bool {
        self.0 == SUPERADMIN_ROLE
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// User ID as persisted; older records carry a number, newer ones a UUID string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Numeric(i64),
    Text(String),
}

/// The cached authenticated user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Identity {
    /// Identity carrying only a role, mostly useful for tests and fixtures
    pub fn with_role(role: impl Into<Role>) -> Self {
        Self {
            role: Some(role.into()),
            ..Default::default()
        }
    }
}

/// Synchronous, local-only access to the current identity
///
/// Implementations must not perform network calls: guards call this on
/// every evaluation.
pub trait IdentityProvider: Send + Sync {
    /// Snapshot of the current identity, `None` if nobody is signed in
    fn current_identity(&self) -> Option<Identity>;
}

/// Provider returning a fixed identity
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    identity: Option<Identity>,
}

impl StaticIdentityProvider {
    pub fn new(identity: Option<Identity>) -> Self {
        Self { identity }
    }

    pub fn anonymous() -> Self {
        Self { identity: None }
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn current_identity(&self) -> Option<Identity> {
        self.identity.clone()
    }
}
