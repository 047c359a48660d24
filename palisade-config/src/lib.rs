// Policy configuration for Palisade
//
// Loads a Content-Security-Policy description from JSON or TOML, applies
// environment overrides, validates it and converts it into the typed model.

pub mod env;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::{DEFAULT_PREFIX, EnvLoader};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use schema::{HashConfig, ListKeyword, PolicyConfig, SourceConfig, SourceListConfig};
pub use validation::{ConfigValidator, Validate};

use palisade_csp::CspHeader;
use palisade_log::{debug, info, warn};
use std::path::Path;

/// Main configuration manager
///
/// Runs the load pipeline: parse → env overrides → validate → convert.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    env: EnvLoader,
    apply_env: bool,
}

impl ConfigManager {
    /// Create a manager reading `PALISADE_CSP_*` overrides
    pub fn new() -> Self {
        Self {
            env: EnvLoader::default(),
            apply_env: true,
        }
    }

    /// Create with environment variable prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            env: EnvLoader::new(prefix),
            apply_env: true,
        }
    }

    /// Skip environment overrides entirely
    pub fn without_env(mut self) -> Self {
        self.apply_env = false;
        self
    }

    /// Load variables from a .env file into the process environment
    pub fn load_dotenv(&self, path: Option<&str>) -> Result<()> {
        if let Some(path) = path {
            dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
        } else if dotenvy::dotenv().is_err() {
            debug!(target: "palisade::config", "No .env file found");
        }
        Ok(())
    }

    /// Load a policy file, detecting the format from its extension
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<CspHeader> {
        let path = path.as_ref();
        let config = ConfigLoader::auto(path)?.load_file(path)?;
        let header = self.build(config)?;

        info!(
            target: "palisade::config",
            "Loaded {} from {}",
            header.name(),
            path.display()
        );
        Ok(header)
    }

    /// Load a policy from an in-memory document
    pub fn load_str(&self, content: &str, format: FileFormat) -> Result<CspHeader> {
        let config = ConfigLoader::new(format).parse(content)?;
        self.build(config)
    }

    /// Apply overrides, validate and convert an already parsed description
    pub fn build(&self, mut config: PolicyConfig) -> Result<CspHeader> {
        if self.apply_env {
            let applied = self.env.apply(&mut config)?;
            if applied > 0 {
                debug!(target: "palisade::config", "{} environment overrides applied", applied);
            }
        }

        if let Err(e) = config.validate() {
            warn!(target: "palisade::config", "Rejected policy: {}", e);
            return Err(e);
        }

        let header = config.to_header()?;
        debug!(target: "palisade::config", "Policy:\n{:#}", header.policy);
        Ok(header)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
