//! Error types for boothcfg Core
//!
//! The `Display` output of every variant is meant to be shown to a person
//! as-is; loaders surface it verbatim.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Event not found")]
    EventNotFound,

    #[error("Failed to load event: {reason}")]
    Http { status_code: u16, reason: String },

    /// Transport failure; the message comes straight from the HTTP stack
    #[error("{0}")]
    Transport(String),

    #[error("Request timeout after {0}s")]
    Timeout(u64),

    #[error("Invalid event configuration: {0}")]
    Parse(String),

    /// Local setup problem, such as an unusable session file path
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_human_readable() {
        assert_eq!(Error::EventNotFound.to_string(), "Event not found");

        let err = Error::Http {
            status_code: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to load event: Service Unavailable");

        assert_eq!(Error::Timeout(30).to_string(), "Request timeout after 30s");
        assert_eq!(
            Error::Config("no home directory".to_string()).to_string(),
            "Configuration error: no home directory"
        );
    }

    #[test]
    fn test_transport_error_is_verbatim() {
        let err = Error::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "connection refused");

        // An empty transport message stays empty so callers can substitute their own
        assert!(Error::Transport(String::new()).to_string().is_empty());
    }
}
