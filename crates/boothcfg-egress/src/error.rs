//! Egress error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EgressError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Request timeout after {0}s")]
    Timeout(u64),

    #[error("Event not found")]
    NotFound,

    #[error("Service returned {status_code}: {reason}")]
    ServiceError { status_code: u16, reason: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, EgressError>;

impl From<EgressError> for boothcfg_core::Error {
    fn from(err: EgressError) -> Self {
        match err {
            EgressError::HttpError(e) => boothcfg_core::Error::Transport(e.to_string()),
            EgressError::Timeout(secs) => boothcfg_core::Error::Timeout(secs),
            EgressError::NotFound => boothcfg_core::Error::EventNotFound,
            EgressError::ServiceError {
                status_code,
                reason,
            } => boothcfg_core::Error::Http {
                status_code,
                reason,
            },
            EgressError::ParseError(msg) => boothcfg_core::Error::Parse(msg),
            EgressError::ConfigError(msg) => boothcfg_core::Error::Config(msg),
        }
    }
}
