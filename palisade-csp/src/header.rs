//! Header name selection for a rendered policy.
//!
//! Attaching the header to a response is left to the HTTP layer; this only
//! pairs the rendered value with the right header name.

use crate::policy::ContentSecurityPolicy;

/// Enforcing header name
pub const CSP_HEADER: &str = "Content-Security-Policy";

/// Report-only header name
pub const CSP_REPORT_ONLY_HEADER: &str = "Content-Security-Policy-Report-Only";

/// Whether the browser enforces the policy or only reports violations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HeaderMode {
    #[default]
    Enforce,
    /// Report violations only (doesn't enforce)
    ReportOnly,
}

impl HeaderMode {
    pub fn header_name(&self) -> &'static str {
        match self {
            Self::Enforce => CSP_HEADER,
            Self::ReportOnly => CSP_REPORT_ONLY_HEADER,
        }
    }
}

/// A policy together with the header it is sent in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CspHeader {
    pub mode: HeaderMode,
    pub policy: ContentSecurityPolicy,
}

impl CspHeader {
    /// Enforcing header for `policy`
    pub fn enforce(policy: ContentSecurityPolicy) -> Self {
        Self {
            mode: HeaderMode::Enforce,
            policy,
        }
    }

    /// Report-only header for `policy`
    pub fn report_only(policy: ContentSecurityPolicy) -> Self {
        Self {
            mode: HeaderMode::ReportOnly,
            policy,
        }
    }

    pub fn name(&self) -> &'static str {
        self.mode.header_name()
    }

    /// Convert to header value
    pub fn value(&self) -> String {
        self.policy.render()
    }

    /// `(name, value)` ready to be set on a response
    pub fn to_pair(&self) -> (&'static str, String) {
        (self.name(), self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Source, SourceList};

    #[test]
    fn test_header_names() {
        assert_eq!(HeaderMode::Enforce.header_name(), "Content-Security-Policy");
        assert_eq!(
            HeaderMode::ReportOnly.header_name(),
            "Content-Security-Policy-Report-Only"
        );
        assert_eq!(HeaderMode::default(), HeaderMode::Enforce);
    }

    #[test]
    fn test_header_pair() {
        let policy = ContentSecurityPolicy {
            default_src: Some(SourceList::from(Source::SelfOrigin)),
            ..Default::default()
        };

        let header = CspHeader::report_only(policy);
        assert_eq!(
            header.to_pair(),
            (
                "Content-Security-Policy-Report-Only",
                "default-src: 'self'".to_string()
            )
        );
    }

    #[test]
    fn test_empty_policy_header_value() {
        let header = CspHeader::enforce(ContentSecurityPolicy::new());
        assert_eq!(header.name(), CSP_HEADER);
        assert_eq!(header.value(), "");
    }
}
