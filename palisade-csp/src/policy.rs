//! Content Security Policy (CSP) record and header rendering
//!
//! CSP helps prevent XSS attacks by declaring which dynamic resources are allowed to load.
//!
//! A [`ContentSecurityPolicy`] is a plain record: every directive is an
//! optional field and an absent field contributes nothing to the header.
//! Build it once with struct-update syntax and render it as many times as
//! needed; rendering never mutates the policy.
//!
//! ```
//! use palisade_csp::{ContentSecurityPolicy, PolicyUrl, Source, SourceList};
//!
//! let csp = ContentSecurityPolicy {
//!     default_src: Some(SourceList::from([Source::SelfOrigin])),
//!     base_uri: Some(PolicyUrl::parse("https://readeval.press").unwrap()),
//!     upgrade_insecure_requests: true,
//!     ..Default::default()
//! };
//!
//! assert_eq!(
//!     csp.render(),
//!     "default-src: 'self'; base-uri: https://readeval.press; upgrade-insecure-requests"
//! );
//! ```

use crate::directive::Directive;
use crate::policy_url::PolicyUrl;
use crate::source_list::SourceList;
use std::fmt;

/// A MIME type token for `plugin-types`
pub type MimeType = String;

/// Separator between rendered directives
pub const DIRECTIVE_SEPARATOR: &str = "; ";

/// Content Security Policy configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSecurityPolicy {
    /// default-src
    pub default_src: Option<SourceList>,

    /// base-uri
    pub base_uri: Option<PolicyUrl>,

    /// child-src
    pub child_src: Option<SourceList>,

    /// connect-src
    pub connect_src: Option<SourceList>,

    /// font-src
    pub font_src: Option<SourceList>,

    /// form-action
    pub form_action: Option<SourceList>,

    /// frame-ancestors
    pub frame_ancestors: Option<SourceList>,

    /// frame-src
    pub frame_src: Option<SourceList>,

    /// img-src
    pub img_src: Option<SourceList>,

    /// media-src
    pub media_src: Option<SourceList>,

    /// object-src
    pub object_src: Option<SourceList>,

    /// plugin-types
    pub plugin_types: Option<Vec<MimeType>>,

    /// report-uri
    pub report_uri: Option<PolicyUrl>,

    /// script-src
    pub script_src: Option<SourceList>,

    /// style-src
    pub style_src: Option<SourceList>,

    /// upgrade-insecure-requests (emitted without a value when true)
    pub upgrade_insecure_requests: bool,

    /// worker-src
    pub worker_src: Option<SourceList>,
}

/// Borrowed value of a present directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveValue<'a> {
    Sources(&'a SourceList),
    Url(&'a PolicyUrl),
    MimeTypes(&'a [MimeType]),
    Flag,
}

impl fmt::Display for DirectiveValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveValue::Sources(sources) => f.write_str(sources.as_str()),
            DirectiveValue::Url(url) => f.write_str(url.as_str()),
            DirectiveValue::MimeTypes(types) => f.write_str(&types.join(" ")),
            DirectiveValue::Flag => Ok(()),
        }
    }
}

fn sources(list: &Option<SourceList>) -> Option<DirectiveValue<'_>> {
    list.as_ref().map(DirectiveValue::Sources)
}

fn url(url: &Option<PolicyUrl>) -> Option<DirectiveValue<'_>> {
    url.as_ref().map(DirectiveValue::Url)
}

impl ContentSecurityPolicy {
    /// Create an empty policy (renders as an empty string)
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `directive`, if it would be emitted
    pub fn get(&self, directive: Directive) -> Option<DirectiveValue<'_>> {
        match directive {
            Directive::DefaultSrc => sources(&self.default_src),
            Directive::BaseUri => url(&self.base_uri),
            Directive::ChildSrc => sources(&self.child_src),
            Directive::ConnectSrc => sources(&self.connect_src),
            Directive::FontSrc => sources(&self.font_src),
            Directive::FormAction => sources(&self.form_action),
            Directive::FrameAncestors => sources(&self.frame_ancestors),
            Directive::FrameSrc => sources(&self.frame_src),
            Directive::ImgSrc => sources(&self.img_src),
            Directive::MediaSrc => sources(&self.media_src),
            Directive::ObjectSrc => sources(&self.object_src),
            Directive::PluginTypes => self
                .plugin_types
                .as_deref()
                .map(DirectiveValue::MimeTypes),
            Directive::ReportUri => url(&self.report_uri),
            Directive::ScriptSrc => sources(&self.script_src),
            Directive::StyleSrc => sources(&self.style_src),
            Directive::UpgradeInsecureRequests => {
                self.upgrade_insecure_requests.then_some(DirectiveValue::Flag)
            }
            Directive::WorkerSrc => sources(&self.worker_src),
        }
    }

    /// Present directives in rendering order
    pub fn directives(&self) -> Vec<(Directive, DirectiveValue<'_>)> {
        Directive::ALL
            .iter()
            .filter_map(|&directive| self.get(directive).map(|value| (directive, value)))
            .collect()
    }

    /// True when rendering would produce an empty string
    pub fn is_empty(&self) -> bool {
        Directive::ALL.iter().all(|&directive| self.get(directive).is_none())
    }

    /// Render the header value
    pub fn render(&self) -> String {
        self.directives()
            .into_iter()
            .map(|(directive, value)| match value {
                DirectiveValue::Flag => directive.name().to_string(),
                value => format!("{}: {}", directive.name(), value),
            })
            .collect::<Vec<_>>()
            .join(DIRECTIVE_SEPARATOR)
    }

    /// Render with one directive per line, for logs and debugging
    ///
    /// Every `;` is followed by a newline, including any inside a source
    /// token. Runs like `;;` are kept as `;\n;\n` rather than collapsed.
    pub fn render_debug(&self) -> String {
        self.render().replace(';', ";\n")
    }
}

/// `{}` renders the header value, `{:#}` the multi-line debug form
impl fmt::Display for ContentSecurityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(&self.render_debug())
        } else {
            f.write_str(&self.render())
        }
    }
}
