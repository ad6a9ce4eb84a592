//! File-based session store
//!
//! The session file is a JSON object of storage keys to values. Values are
//! normally JSON-encoded strings, the way browser storage holds them, but
//! plain JSON values are accepted too:
//!
//! ```json
//! {
//!   "user": "{\"id\": \"c0ffee\", \"role\": \"business_eventpro\"}",
//!   "auth_token": "eyJhbGciOi..."
//! }
//! ```
//!
//! The file is read on every call. Nothing is cached and nothing is written.

use boothcfg_core::{Error, Identity, IdentityProvider, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Record written by the current authentication flow
pub const CURRENT_USER_KEY: &str = "user";

/// Record written by the previous authentication flow
pub const LEGACY_USER_KEY: &str = "current_user";

pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Read-only view over a persisted session file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    /// Path to the session file
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store for the given path
    ///
    /// The file does not have to exist yet; a missing file reads as
    /// "nobody signed in".
    ///
    /// # Errors
    /// - `Error::Config` if the path starts with `~` and there is no home directory
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        // Expand tilde if present
        let path = match path.strip_prefix("~") {
            Ok(rest) => dirs::home_dir()
                .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?
                .join(rest),
            Err(_) => path,
        };

        debug!("Initialized FileSessionStore for {:?}", path);
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored bearer token, if any
    pub fn auth_token(&self) -> Option<String> {
        let storage = self.read_storage()?;
        match storage.get(AUTH_TOKEN_KEY)? {
            Value::String(token) if !token.is_empty() => Some(token.clone()),
            _ => None,
        }
    }

    /// Read and parse the session file
    fn read_storage(&self) -> Option<Map<String, Value>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No session file at {:?}", self.path);
                return None;
            }
            Err(e) => {
                warn!("Failed to read session file {:?}: {}", self.path, e);
                return None;
            }
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(storage)) => Some(storage),
            Ok(_) => {
                warn!("Session file {:?} is not a JSON object", self.path);
                None
            }
            Err(e) => {
                warn!("Failed to parse session file {:?}: {}", self.path, e);
                None
            }
        }
    }
}

/// Decode one stored user record
///
/// `Ok(None)` means the record explicitly holds `null`.
fn parse_user(value: &Value) -> std::result::Result<Option<Identity>, serde_json::Error> {
    match value {
        Value::String(encoded) => serde_json::from_str(encoded),
        other => serde_json::from_value(other.clone()),
    }
}

impl IdentityProvider for FileSessionStore {
    fn current_identity(&self) -> Option<Identity> {
        let storage = self.read_storage()?;

        if let Some(record) = storage.get(CURRENT_USER_KEY) {
            match parse_user(record) {
                Ok(identity) => return identity,
                Err(e) => error!("Failed to parse stored user record: {}", e),
            }
        }

        // Fall back to the legacy record; unreadable legacy data means signed out
        let record = storage.get(LEGACY_USER_KEY)?;
        parse_user(record).ok().flatten()
    }
}
