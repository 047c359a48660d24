//! Fuzz target for policy rendering.
//!
//! Builds policies from arbitrary sources and checks that rendering keeps
//! the fixed directive order and never emits an unset directive.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use palisade_csp::{ContentSecurityPolicy, Directive, HashAlgorithm, PolicyUrl, Source, SourceList};

#[derive(Debug, Arbitrary)]
enum FuzzSource {
    SelfOrigin,
    UnsafeInline,
    UnsafeEval,
    StrictDynamic,
    Scheme(String),
    Host(String),
    Nonce(String),
    Hash(u8, Vec<u8>),
}

#[derive(Debug, Arbitrary)]
enum FuzzList {
    All,
    None,
    Sources(Vec<FuzzSource>),
}

#[derive(Debug, Arbitrary)]
struct FuzzPolicy {
    lists: [Option<FuzzList>; 13],
    base_uri: Option<String>,
    report_uri: Option<String>,
    plugin_types: Option<Vec<String>>,
    upgrade_insecure_requests: bool,
}

impl FuzzSource {
    fn to_source(&self) -> Source {
        match self {
            FuzzSource::SelfOrigin => Source::SelfOrigin,
            FuzzSource::UnsafeInline => Source::UnsafeInline,
            FuzzSource::UnsafeEval => Source::UnsafeEval,
            FuzzSource::StrictDynamic => Source::StrictDynamic,
            FuzzSource::Scheme(s) => Source::scheme(s.as_str()),
            FuzzSource::Host(s) => Source::host(s.as_str()),
            FuzzSource::Nonce(s) => Source::nonce(s.as_str()),
            FuzzSource::Hash(n, digest) => {
                let algorithm = match n % 3 {
                    0 => HashAlgorithm::Sha256,
                    1 => HashAlgorithm::Sha384,
                    _ => HashAlgorithm::Sha512,
                };
                Source::hash(algorithm, digest.clone())
            }
        }
    }
}

impl FuzzList {
    fn to_list(&self) -> SourceList {
        match self {
            FuzzList::All => SourceList::all(),
            FuzzList::None => SourceList::none(),
            FuzzList::Sources(sources) => sources.iter().map(FuzzSource::to_source).collect(),
        }
    }
}

fuzz_target!(|data: FuzzPolicy| {
    let [
        default_src,
        child_src,
        connect_src,
        font_src,
        form_action,
        frame_ancestors,
        frame_src,
        img_src,
        media_src,
        object_src,
        script_src,
        style_src,
        worker_src,
    ] = data.lists.map(|list| list.map(|l| l.to_list()));

    let policy = ContentSecurityPolicy {
        default_src,
        base_uri: data.base_uri.and_then(|u| PolicyUrl::parse(u).ok()),
        child_src,
        connect_src,
        font_src,
        form_action,
        frame_ancestors,
        frame_src,
        img_src,
        media_src,
        object_src,
        plugin_types: data.plugin_types,
        report_uri: data.report_uri.and_then(|u| PolicyUrl::parse(u).ok()),
        script_src,
        style_src,
        upgrade_insecure_requests: data.upgrade_insecure_requests,
        worker_src,
    };

    let rendered = policy.render();
    assert_eq!(rendered, policy.render());
    assert_eq!(policy.is_empty(), rendered.is_empty());

    // Present directives come out in the fixed order
    let present = policy.directives();
    let mut last = None;
    for (directive, _) in &present {
        assert!(Some(*directive) > last);
        last = Some(*directive);
    }

    for directive in Directive::ALL {
        let set = policy.get(directive).is_some();
        assert_eq!(set, present.iter().any(|(d, _)| *d == directive));
        if !set && directive != Directive::UpgradeInsecureRequests {
            let entry = format!("{}: ", directive.name());
            assert!(!rendered.starts_with(&entry));
        }
    }

    assert_eq!(policy.render_debug(), rendered.replace(';', ";\n"));
});
