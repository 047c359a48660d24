// Policy file loaders

use crate::schema::PolicyConfig;
use crate::{ConfigError, Result};
use palisade_log::debug;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Policy file loader
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Auto-detect format from file extension
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported format: {}", ext)))?;

        Ok(Self::new(format))
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Load a policy description from file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<PolicyConfig> {
        let path = path.as_ref();
        debug!(target: "palisade::config", "Reading {:?} policy from {}", self.format, path.display());

        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        self.parse(&content)
    }

    /// Parse a policy description from a string
    pub fn parse(&self, content: &str) -> Result<PolicyConfig> {
        let value = match self.format {
            FileFormat::Json => self.parse_json(content)?,
            FileFormat::Toml => self.parse_toml(content)?,
        };

        serde_json::from_value(value)
            .map_err(|e| ConfigError::ParseError(format!("Invalid policy: {}", e)))
    }

    fn parse_json(&self, content: &str) -> Result<Value> {
        serde_json::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))
    }

    fn parse_toml(&self, content: &str) -> Result<Value> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

        // Go through JSON so both formats share one deserialization path
        serde_json::to_value(toml_value)
            .map_err(|e| ConfigError::ParseError(format!("TOML to JSON conversion error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ListKeyword, SourceConfig, SourceListConfig};

    #[test]
    fn test_parse_json() {
        let loader = ConfigLoader::new(FileFormat::Json);
        let json = r#"{"default-src": ["self"], "object-src": "none"}"#;

        let config = loader.parse(json).unwrap();
        assert_eq!(
            config.default_src,
            Some(SourceListConfig::Sources(vec![SourceConfig::SelfOrigin]))
        );
        assert_eq!(
            config.object_src,
            Some(SourceListConfig::Keyword(ListKeyword::None))
        );
    }

    #[test]
    fn test_parse_toml() {
        let loader = ConfigLoader::new(FileFormat::Toml);
        let toml = r#"
            report-only = true
            script-src = ["self", { nonce = "abc123" }]
            upgrade-insecure-requests = true
        "#;

        let config = loader.parse(toml).unwrap();
        assert!(config.report_only);
        assert!(config.upgrade_insecure_requests);
        assert_eq!(
            config.script_src,
            Some(SourceListConfig::Sources(vec![
                SourceConfig::SelfOrigin,
                SourceConfig::Nonce("abc123".to_string()),
            ]))
        );
    }

    #[test]
    fn test_parse_errors() {
        let loader = ConfigLoader::new(FileFormat::Json);
        assert!(matches!(loader.parse("{"), Err(ConfigError::ParseError(_))));
        assert!(matches!(
            loader.parse(r#"{"script-src": 42}"#),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_extension("json"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension("TOML"), Some(FileFormat::Toml));
        assert_eq!(FileFormat::from_extension("yaml"), None);

        assert_eq!(ConfigLoader::auto("csp.toml").unwrap().format(), FileFormat::Toml);
        assert!(ConfigLoader::auto("csp").is_err());
        assert!(ConfigLoader::auto("csp.ini").is_err());
    }
}
