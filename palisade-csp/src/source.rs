//! Individual CSP sources.
//!
//! A [`Source`] is one token inside a directive value: a keyword such as
//! `'self'`, a scheme or host expression, a nonce or a hash.

use crate::hash::HashAlgorithm;
use base64::{Engine, engine::general_purpose::STANDARD};
use std::fmt;

/// One allowed origin or keyword in a source list.
///
/// Construction never fails and performs no escaping. Callers supply
/// syntactically valid scheme, host and nonce tokens.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    /// `'self'`
    SelfOrigin,
    /// `'unsafe-inline'`
    UnsafeInline,
    /// `'unsafe-eval'`
    UnsafeEval,
    /// `'strict-dynamic'`
    StrictDynamic,
    /// Scheme source, rendered verbatim (e.g. `https:`)
    Scheme(String),
    /// Host source, rendered verbatim (e.g. `*.example.com`)
    Host(String),
    /// `'nonce-<token>'`
    Nonce(String),
    /// `'<algorithm>-<base64 digest>'`
    Hash(HashAlgorithm, Vec<u8>),
}

impl Source {
    /// Scheme source such as `https:` or `data:`
    pub fn scheme(scheme: impl Into<String>) -> Self {
        Self::Scheme(scheme.into())
    }

    /// Host source such as `cdn.example.com` or `*.example.com`
    pub fn host(host: impl Into<String>) -> Self {
        Self::Host(host.into())
    }

    /// Nonce source from an already encoded token
    pub fn nonce(token: impl Into<String>) -> Self {
        Self::Nonce(token.into())
    }

    /// Hash source from a raw digest
    pub fn hash(algorithm: HashAlgorithm, digest: impl Into<Vec<u8>>) -> Self {
        Self::Hash(algorithm, digest.into())
    }

    /// Hash source for inline content, digesting `content` with `algorithm`
    pub fn hash_of(algorithm: HashAlgorithm, content: impl AsRef<[u8]>) -> Self {
        Self::Hash(algorithm, algorithm.digest(content))
    }

    /// Whether this source is one of the quoted keywords
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::SelfOrigin | Self::UnsafeInline | Self::UnsafeEval | Self::StrictDynamic
        )
    }

    /// Keyword text for payload-free variants
    pub fn as_static_str(&self) -> Option<&'static str> {
        match self {
            Self::SelfOrigin => Some("'self'"),
            Self::UnsafeInline => Some("'unsafe-inline'"),
            Self::UnsafeEval => Some("'unsafe-eval'"),
            Self::StrictDynamic => Some("'strict-dynamic'"),
            _ => None,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheme(scheme) => f.write_str(scheme),
            Self::Host(host) => f.write_str(host),
            Self::Nonce(token) => write!(f, "'nonce-{}'", token),
            Self::Hash(algorithm, digest) => {
                write!(f, "'{}-{}'", algorithm, STANDARD.encode(digest))
            }
            keyword => f.write_str(keyword.as_static_str().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_rendering() {
        assert_eq!(Source::SelfOrigin.to_string(), "'self'");
        assert_eq!(Source::UnsafeInline.to_string(), "'unsafe-inline'");
        assert_eq!(Source::UnsafeEval.to_string(), "'unsafe-eval'");
        assert_eq!(Source::StrictDynamic.to_string(), "'strict-dynamic'");
    }

    #[test]
    fn test_scheme_and_host_are_unquoted() {
        assert_eq!(Source::scheme("https:").to_string(), "https:");
        assert_eq!(Source::host("*.example.com").to_string(), "*.example.com");
    }

    #[test]
    fn test_nonce_rendering() {
        assert_eq!(Source::nonce("abc123").to_string(), "'nonce-abc123'");
    }

    #[test]
    fn test_hash_rendering_uses_padded_base64() {
        let source = Source::hash(HashAlgorithm::Sha256, b"abc".to_vec());
        assert_eq!(source.to_string(), "'sha256-YWJj'");

        let source = Source::hash(HashAlgorithm::Sha384, vec![0xff, 0xfe]);
        assert_eq!(source.to_string(), "'sha384-//4='");
    }

    #[test]
    fn test_hash_of_inline_script() {
        let source = Source::hash_of(HashAlgorithm::Sha256, "alert('Hello, world.');");
        assert_eq!(
            source.to_string(),
            "'sha256-qznLcsROx4GACP2dm0UCKCzCG+HiZ1guq6ZZDob/Tng='"
        );
    }

    #[test]
    fn test_no_validation_of_payloads() {
        // Caller-supplied garbage passes through untouched
        assert_eq!(Source::host("a;b").to_string(), "a;b");
        assert_eq!(Source::scheme("").to_string(), "");
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Source::host("example.com"), Source::Host("example.com".to_string()));
        assert_ne!(Source::host("example.com"), Source::scheme("example.com"));
        assert_ne!(
            Source::hash(HashAlgorithm::Sha256, vec![1, 2]),
            Source::hash(HashAlgorithm::Sha512, vec![1, 2])
        );
        assert_ne!(
            Source::hash(HashAlgorithm::Sha256, vec![1, 2]),
            Source::hash(HashAlgorithm::Sha256, vec![1, 3])
        );
    }

    #[test]
    fn test_keyword_classification() {
        assert!(Source::SelfOrigin.is_keyword());
        assert!(!Source::nonce("x").is_keyword());
        assert_eq!(Source::host("x").as_static_str(), None);
    }
}
