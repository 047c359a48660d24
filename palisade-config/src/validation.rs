// Configuration validation

use crate::schema::{PolicyConfig, SourceConfig, SourceListConfig};
use crate::{ConfigError, Result};
use palisade_csp::PolicyUrl;

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Field-level validation rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate that a value is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    /// Validate that a value is an absolute URL
    pub fn is_url(value: &str, field: &str) -> Result<()> {
        PolicyUrl::parse(value).map(|_| ()).map_err(|e| {
            ConfigError::ValidationError(format!("{} must be an absolute URL ({})", field, e))
        })
    }

    /// Validate a `type/subtype` MIME token
    pub fn is_mime_type(value: &str, field: &str) -> Result<()> {
        let valid = match value.split_once('/') {
            Some((kind, subtype)) => {
                !kind.is_empty()
                    && !subtype.is_empty()
                    && !subtype.contains('/')
                    && !value.chars().any(|c| c.is_whitespace() || c == ';')
            }
            None => false,
        };

        if !valid {
            return Err(ConfigError::ValidationError(format!(
                "{} must be a MIME type, got '{}'",
                field, value
            )));
        }
        Ok(())
    }
}

impl Validate for SourceConfig {
    fn validate(&self) -> Result<()> {
        match self {
            SourceConfig::Scheme(scheme) => ConfigValidator::not_empty(scheme, "scheme source"),
            SourceConfig::Host(host) => ConfigValidator::not_empty(host, "host source"),
            SourceConfig::Nonce(token) => ConfigValidator::not_empty(token, "nonce source"),
            SourceConfig::Hash(hash) => ConfigValidator::not_empty(&hash.digest, "hash digest"),
            _ => Ok(()),
        }
    }
}

impl Validate for PolicyConfig {
    fn validate(&self) -> Result<()> {
        for (name, list) in self.source_lists() {
            if let Some(SourceListConfig::Sources(sources)) = list {
                for source in sources {
                    source.validate().map_err(|e| match e {
                        ConfigError::ValidationError(msg) => {
                            ConfigError::ValidationError(format!("{}: {}", name, msg))
                        }
                        other => other,
                    })?;
                }
            }
        }

        if let Some(ref base_uri) = self.base_uri {
            ConfigValidator::is_url(base_uri, "base-uri")?;
        }

        if let Some(ref report_uri) = self.report_uri {
            ConfigValidator::is_url(report_uri, "report-uri")?;
        }

        if let Some(ref plugin_types) = self.plugin_types {
            for mime in plugin_types {
                ConfigValidator::is_mime_type(mime, "plugin-types")?;
            }
        }

        Ok(())
    }
}
