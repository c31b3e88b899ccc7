use thiserror::Error;

/// Main error type for gitmate
#[derive(Error, Debug)]
pub enum GitmateError {
    #[error("Oracle error: {0}")]
    OracleError(String),

    #[error("Oracle request timed out after {0} seconds")]
    OracleTimeout(u64),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Input closed while waiting for: {0}")]
    InputClosed(String),
}
