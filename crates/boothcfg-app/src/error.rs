//! Application wiring errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Connector(#[from] boothcfg_egress::EgressError),

    /// The session file path could not be resolved
    #[error("Invalid session file path: {0}")]
    SessionPath(#[from] boothcfg_core::Error),

    #[error("Failed to register metrics: {0}")]
    Metrics(#[from] prometheus::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_path_error_wraps_core_config_error() {
        let err = AppError::from(boothcfg_core::Error::Config(
            "Could not determine home directory".to_string(),
        ));

        assert!(matches!(err, AppError::SessionPath(_)));
        assert_eq!(
            err.to_string(),
            "Invalid session file path: Configuration error: Could not determine home directory"
        );
    }
}
