//! Directive names and rendering order.

use std::fmt;

/// The kind of value a directive carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// A [`SourceList`](crate::SourceList)
    SourceList,
    /// A single absolute URL
    Url,
    /// A space-separated list of MIME types
    MimeTypes,
    /// A bare directive name with no value
    Flag,
}

/// CSP directives understood by [`ContentSecurityPolicy`](crate::ContentSecurityPolicy)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Directive {
    DefaultSrc,
    BaseUri,
    ChildSrc,
    ConnectSrc,
    FontSrc,
    FormAction,
    FrameAncestors,
    FrameSrc,
    ImgSrc,
    MediaSrc,
    ObjectSrc,
    PluginTypes,
    ReportUri,
    ScriptSrc,
    StyleSrc,
    UpgradeInsecureRequests,
    WorkerSrc,
}

impl Directive {
    /// Every directive, in the order they appear in a rendered policy
    pub const ALL: [Directive; 17] = [
        Directive::DefaultSrc,
        Directive::BaseUri,
        Directive::ChildSrc,
        Directive::ConnectSrc,
        Directive::FontSrc,
        Directive::FormAction,
        Directive::FrameAncestors,
        Directive::FrameSrc,
        Directive::ImgSrc,
        Directive::MediaSrc,
        Directive::ObjectSrc,
        Directive::PluginTypes,
        Directive::ReportUri,
        Directive::ScriptSrc,
        Directive::StyleSrc,
        Directive::UpgradeInsecureRequests,
        Directive::WorkerSrc,
    ];

    /// Wire name of the directive
    pub fn name(&self) -> &'static str {
        match self {
            Directive::DefaultSrc => "default-src",
            Directive::BaseUri => "base-uri",
            Directive::ChildSrc => "child-src",
            Directive::ConnectSrc => "connect-src",
            Directive::FontSrc => "font-src",
            Directive::FormAction => "form-action",
            Directive::FrameAncestors => "frame-ancestors",
            Directive::FrameSrc => "frame-src",
            Directive::ImgSrc => "img-src",
            Directive::MediaSrc => "media-src",
            Directive::ObjectSrc => "object-src",
            Directive::PluginTypes => "plugin-types",
            Directive::ReportUri => "report-uri",
            Directive::ScriptSrc => "script-src",
            Directive::StyleSrc => "style-src",
            Directive::UpgradeInsecureRequests => "upgrade-insecure-requests",
            Directive::WorkerSrc => "worker-src",
        }
    }

    pub fn kind(&self) -> DirectiveKind {
        match self {
            Directive::BaseUri | Directive::ReportUri => DirectiveKind::Url,
            Directive::PluginTypes => DirectiveKind::MimeTypes,
            Directive::UpgradeInsecureRequests => DirectiveKind::Flag,
            _ => DirectiveKind::SourceList,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_declaration_order() {
        let mut sorted = Directive::ALL;
        sorted.sort();
        assert_eq!(sorted, Directive::ALL);
    }

    #[test]
    fn test_names() {
        assert_eq!(Directive::DefaultSrc.name(), "default-src");
        assert_eq!(Directive::FrameAncestors.to_string(), "frame-ancestors");
        assert_eq!(
            Directive::UpgradeInsecureRequests.name(),
            "upgrade-insecure-requests"
        );
    }

    #[test]
    fn test_kinds() {
        let source_lists = Directive::ALL
            .iter()
            .filter(|d| d.kind() == DirectiveKind::SourceList)
            .count();
        assert_eq!(source_lists, 13);
        assert_eq!(Directive::BaseUri.kind(), DirectiveKind::Url);
        assert_eq!(Directive::ReportUri.kind(), DirectiveKind::Url);
        assert_eq!(Directive::PluginTypes.kind(), DirectiveKind::MimeTypes);
        assert_eq!(Directive::UpgradeInsecureRequests.kind(), DirectiveKind::Flag);
    }
}
