// Serializable policy description
//
// The on-disk shape mirrors the header: one kebab-case key per directive.
// Conversion into the typed model happens in `to_policy`, after which the
// description is no longer needed.

use crate::{ConfigError, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use palisade_csp::{
    ContentSecurityPolicy, CspHeader, HashAlgorithm, HeaderMode, PolicyUrl, Source, SourceList,
};
use serde::{Deserialize, Serialize};

/// A whole policy as written in a configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PolicyConfig {
    /// Send as `Content-Security-Policy-Report-Only`
    #[serde(default)]
    pub report_only: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_src: Option<SourceListConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_src: Option<SourceListConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_src: Option<SourceListConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_src: Option<SourceListConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_action: Option<SourceListConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_ancestors: Option<SourceListConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_src: Option<SourceListConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_src: Option<SourceListConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_src: Option<SourceListConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_src: Option<SourceListConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_types: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_src: Option<SourceListConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_src: Option<SourceListConfig>,

    #[serde(default)]
    pub upgrade_insecure_requests: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_src: Option<SourceListConfig>,
}

/// `"all"`, `"none"` or an explicit array of sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceListConfig {
    Keyword(ListKeyword),
    Sources(Vec<SourceConfig>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKeyword {
    All,
    None,
}

/// One source: a keyword string or a single-key table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceConfig {
    #[serde(rename = "self")]
    SelfOrigin,
    UnsafeInline,
    UnsafeEval,
    StrictDynamic,
    Scheme(String),
    Host(String),
    Nonce(String),
    Hash(HashConfig),
}

/// Hash source with a base64-encoded digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HashConfig {
    pub algorithm: String,
    pub digest: String,
}

impl HashConfig {
    /// Decode the digest and check its length against the algorithm
    pub fn to_source(&self) -> Result<Source> {
        let algorithm: HashAlgorithm = self.algorithm.parse()?;

        let digest = STANDARD
            .decode(self.digest.trim())
            .map_err(|e| ConfigError::InvalidDigest {
                algorithm: algorithm.to_string(),
                reason: e.to_string(),
            })?;

        if digest.len() != algorithm.digest_len() {
            return Err(ConfigError::InvalidDigest {
                algorithm: algorithm.to_string(),
                reason: format!(
                    "expected {} bytes, got {}",
                    algorithm.digest_len(),
                    digest.len()
                ),
            });
        }

        Ok(Source::hash(algorithm, digest))
    }
}

impl SourceConfig {
    pub fn to_source(&self) -> Result<Source> {
        Ok(match self {
            SourceConfig::SelfOrigin => Source::SelfOrigin,
            SourceConfig::UnsafeInline => Source::UnsafeInline,
            SourceConfig::UnsafeEval => Source::UnsafeEval,
            SourceConfig::StrictDynamic => Source::StrictDynamic,
            SourceConfig::Scheme(scheme) => Source::scheme(scheme.as_str()),
            SourceConfig::Host(host) => Source::host(host.as_str()),
            SourceConfig::Nonce(token) => Source::nonce(token.as_str()),
            SourceConfig::Hash(hash) => hash.to_source()?,
        })
    }
}

impl SourceListConfig {
    pub fn to_source_list(&self) -> Result<SourceList> {
        match self {
            SourceListConfig::Keyword(ListKeyword::All) => Ok(SourceList::all()),
            SourceListConfig::Keyword(ListKeyword::None) => Ok(SourceList::none()),
            SourceListConfig::Sources(sources) => sources
                .iter()
                .map(SourceConfig::to_source)
                .collect::<Result<Vec<_>>>()
                .map(SourceList::new),
        }
    }
}

fn source_list(config: &Option<SourceListConfig>) -> Result<Option<SourceList>> {
    config.as_ref().map(SourceListConfig::to_source_list).transpose()
}

fn policy_url(config: &Option<String>) -> Result<Option<PolicyUrl>> {
    Ok(config.as_deref().map(PolicyUrl::parse).transpose()?)
}

impl PolicyConfig {
    /// Source-list fields paired with their directive names
    pub fn source_lists(&self) -> [(&'static str, Option<&SourceListConfig>); 13] {
        [
            ("default-src", self.default_src.as_ref()),
            ("child-src", self.child_src.as_ref()),
            ("connect-src", self.connect_src.as_ref()),
            ("font-src", self.font_src.as_ref()),
            ("form-action", self.form_action.as_ref()),
            ("frame-ancestors", self.frame_ancestors.as_ref()),
            ("frame-src", self.frame_src.as_ref()),
            ("img-src", self.img_src.as_ref()),
            ("media-src", self.media_src.as_ref()),
            ("object-src", self.object_src.as_ref()),
            ("script-src", self.script_src.as_ref()),
            ("style-src", self.style_src.as_ref()),
            ("worker-src", self.worker_src.as_ref()),
        ]
    }

    /// Build the typed policy
    pub fn to_policy(&self) -> Result<ContentSecurityPolicy> {
        Ok(ContentSecurityPolicy {
            default_src: source_list(&self.default_src)?,
            base_uri: policy_url(&self.base_uri)?,
            child_src: source_list(&self.child_src)?,
            connect_src: source_list(&self.connect_src)?,
            font_src: source_list(&self.font_src)?,
            form_action: source_list(&self.form_action)?,
            frame_ancestors: source_list(&self.frame_ancestors)?,
            frame_src: source_list(&self.frame_src)?,
            img_src: source_list(&self.img_src)?,
            media_src: source_list(&self.media_src)?,
            object_src: source_list(&self.object_src)?,
            plugin_types: self.plugin_types.clone(),
            report_uri: policy_url(&self.report_uri)?,
            script_src: source_list(&self.script_src)?,
            style_src: source_list(&self.style_src)?,
            upgrade_insecure_requests: self.upgrade_insecure_requests,
            worker_src: source_list(&self.worker_src)?,
        })
    }

    /// Build the typed policy together with its header mode
    pub fn to_header(&self) -> Result<CspHeader> {
        let mode = if self.report_only {
            HeaderMode::ReportOnly
        } else {
            HeaderMode::Enforce
        };

        Ok(CspHeader {
            mode,
            policy: self.to_policy()?,
        })
    }
}
