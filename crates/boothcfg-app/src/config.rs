use boothcfg_observability::LoggingConfig;
use boothcfg_routing::GuardDestinations;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub routes: GuardDestinations,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the event configuration service
    #[serde(default)]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Persisted session file (`~` is expanded)
    #[serde(default = "default_session_path")]
    pub path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

impl ApiConfig {
    /// Base URL as requests should use it
    ///
    /// Trailing slashes are dropped and plain HTTP is upgraded to HTTPS
    /// unless the host is local.
    pub fn resolved_base_url(&self) -> String {
        enforce_https(self.base_url.trim().trim_end_matches('/'))
    }
}

impl AppConfig {
    /// Load from a file, then apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::from_file(path)?;
        config.merge_env();
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents)?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("BOOTHCFG_API_URL") {
            self.api.base_url = val;
        }

        if let Ok(val) = std::env::var("BOOTHCFG_API_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) if secs > 0 => self.api.timeout_secs = secs,
                _ => eprintln!(
                    "Warning: Invalid BOOTHCFG_API_TIMEOUT_SECS '{}', using {}",
                    val, self.api.timeout_secs
                ),
            }
        }

        if let Ok(val) = std::env::var("BOOTHCFG_SESSION_FILE") {
            self.session.path = val;
        }

        if let Ok(val) = std::env::var("BOOTHCFG_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Ok(val) = std::env::var("BOOTHCFG_LOG_JSON") {
            if let Ok(json) = val.parse::<bool>() {
                self.logging.json = json;
            }
        }
    }
}

/// Upgrade `http://` to `https://` for anything but local hosts
pub fn enforce_https(url: &str) -> String {
    let Some(rest) = url.strip_prefix("http://") else {
        return url.to_string();
    };

    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();

    if is_local_host(host) {
        url.to_string()
    } else {
        format!("https://{}", rest)
    }
}

fn is_local_host(host: &str) -> bool {
    host == "localhost" || host == "127.0.0.1" || host.starts_with("192.168.")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_session_path() -> String {
    "~/.boothcfg/session.json".to_string()
}
