// Environment variable overrides

use crate::schema::PolicyConfig;
use crate::{ConfigError, Result};
use palisade_log::{debug, warn};
use std::env;

/// Prefix used when none is given
pub const DEFAULT_PREFIX: &str = "PALISADE_CSP";

/// Applies `<PREFIX>_*` variables on top of a loaded policy.
///
/// Recognised keys: `REPORT_URI`, `BASE_URI`, `UPGRADE_INSECURE_REQUESTS`,
/// `REPORT_ONLY` and `PLUGIN_TYPES` (space separated).
#[derive(Debug, Clone)]
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}_{}", self.prefix, key.to_uppercase())
    }

    /// Load a specific environment variable
    pub fn load_var(&self, key: &str) -> Result<String> {
        env::var(self.full_key(key)).map_err(ConfigError::EnvError)
    }

    /// Load with default value
    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Apply overrides from the process environment
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn apply(&self, config: &mut PolicyConfig) -> Result<usize> {
        let vars = env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
        self.apply_vars(config, vars)
    }

    /// Apply overrides from explicit `(key, value)` pairs.
    ///
    /// Returns the number of overrides applied. Keys outside the prefix are
    /// ignored.
    pub fn apply_vars<I, K, V>(&self, config: &mut PolicyConfig, vars: I) -> Result<usize>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let prefix = format!("{}_", self.prefix);
        let mut applied = 0;

        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref());
            let Some(name) = key.strip_prefix(&prefix) else {
                continue;
            };

            match name {
                "REPORT_URI" => config.report_uri = Some(value.to_string()),
                "BASE_URI" => config.base_uri = Some(value.to_string()),
                "UPGRADE_INSECURE_REQUESTS" => {
                    config.upgrade_insecure_requests = parse_bool(key, value)?
                }
                "REPORT_ONLY" => config.report_only = parse_bool(key, value)?,
                "PLUGIN_TYPES" => {
                    config.plugin_types =
                        Some(value.split_whitespace().map(str::to_string).collect())
                }
                _ => {
                    warn!(target: "palisade::config", "Ignoring unknown override {}", key);
                    continue;
                }
            }

            debug!(target: "palisade::config", "Applied override {}", key);
            applied += 1;
        }

        Ok(applied)
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnvValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
