//! Errors raised while building policy values.
//!
//! Rendering never fails. Only the typed inputs that carry their own
//! validation (URLs, hash algorithm names) can reject a value.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CspError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("URL must be absolute: {0}")]
    RelativeUrl(String),

    #[error("Unknown hash algorithm: {0}")]
    UnknownHashAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, CspError>;
