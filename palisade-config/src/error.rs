// Error types for policy configuration

use palisade_csp::CspError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid hash digest for {algorithm}: {reason}")]
    InvalidDigest { algorithm: String, reason: String },

    #[error("Invalid value for environment variable {key}: {value}")]
    InvalidEnvValue { key: String, value: String },

    #[error("Policy error: {0}")]
    Csp(#[from] CspError),

    #[error("Environment variable error: {0}")]
    EnvError(#[from] std::env::VarError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
