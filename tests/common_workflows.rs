//! Integration tests for common Palisade workflows.
//!
//! These tests go through the facade crate the way an application would.

use palisade::prelude::*;
use palisade_config::{ConfigManager, FileFormat};
use pretty_assertions::assert_eq;

// =============================================================================
// Per-Request Nonce
// =============================================================================

#[test]
fn test_nonce_per_request() {
    let base = ContentSecurityPolicy {
        default_src: Some(SourceList::from(Source::SelfOrigin)),
        object_src: Some(SourceList::none()),
        ..Default::default()
    };

    let first = Nonce::generate();
    let second = Nonce::generate();
    assert_ne!(first, second);

    let mut policy = base.clone();
    policy.script_src = Some(SourceList::from([
        Source::SelfOrigin,
        first.to_source(),
        Source::StrictDynamic,
    ]));

    let header = CspHeader::enforce(policy);
    assert_eq!(
        header.value(),
        format!(
            "default-src: 'self'; object-src: 'none'; script-src: 'self' 'nonce-{}' 'strict-dynamic'",
            first.as_str()
        )
    );

    // The shared base is untouched
    assert_eq!(
        base.render(),
        "default-src: 'self'; object-src: 'none'"
    );
}

// =============================================================================
// Inline Script Hashes
// =============================================================================

#[test]
fn test_inline_script_hash() {
    let policy = ContentSecurityPolicy {
        script_src: Some(SourceList::from(Source::hash_of(
            HashAlgorithm::Sha256,
            "alert('Hello, world.');",
        ))),
        ..Default::default()
    };

    assert_eq!(
        policy.to_string(),
        "script-src: 'sha256-qznLcsROx4GACP2dm0UCKCzCG+HiZ1guq6ZZDob/Tng='"
    );
}

// =============================================================================
// Report-Only Rollout
// =============================================================================

#[test]
fn test_report_only_rollout() {
    let policy = ContentSecurityPolicy {
        default_src: Some(SourceList::from(Source::SelfOrigin)),
        report_uri: Some(PolicyUrl::parse("https://example.com/csp-reports").unwrap()),
        ..Default::default()
    };

    let (name, value) = CspHeader::report_only(policy.clone()).to_pair();
    assert_eq!(name, "Content-Security-Policy-Report-Only");
    assert_eq!(
        value,
        "default-src: 'self'; report-uri: https://example.com/csp-reports"
    );

    let (name, enforced) = CspHeader::enforce(policy).to_pair();
    assert_eq!(name, "Content-Security-Policy");
    assert_eq!(enforced, value);
}

#[test]
fn test_relative_report_uri_rejected() {
    assert!(matches!(
        PolicyUrl::parse("/csp-reports"),
        Err(CspError::RelativeUrl(_))
    ));
}

// =============================================================================
// Directive Inspection
// =============================================================================

#[test]
fn test_directive_inspection() {
    let policy = ContentSecurityPolicy {
        worker_src: Some(SourceList::from(Source::scheme("blob:"))),
        default_src: Some(SourceList::all()),
        upgrade_insecure_requests: true,
        ..Default::default()
    };

    let names: Vec<&str> = policy
        .directives()
        .into_iter()
        .map(|(directive, _)| directive.name())
        .collect();

    assert_eq!(
        names,
        vec!["default-src", "upgrade-insecure-requests", "worker-src"]
    );
    assert!(policy.get(Directive::ImgSrc).is_none());
    assert_eq!(
        policy.get(Directive::WorkerSrc).unwrap().to_string(),
        "blob:"
    );
}

// =============================================================================
// Configuration Files
// =============================================================================

#[test]
fn test_policy_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("csp.json");
    std::fs::write(
        &path,
        r#"{
            "report-only": true,
            "default-src": ["self"],
            "img-src": ["self", {"scheme": "data:"}],
            "frame-ancestors": "none"
        }"#,
    )
    .unwrap();

    let header = ConfigManager::new().without_env().load_file(&path).unwrap();

    assert_eq!(header.mode, HeaderMode::ReportOnly);
    assert_eq!(
        header.value(),
        "default-src: 'self'; frame-ancestors: 'none'; img-src: 'self' data:"
    );
}

#[test]
fn test_config_matches_hand_built_policy() {
    let manager = ConfigManager::new().without_env();
    let loaded = manager
        .load_str(
            r#"
                script-src = ["self", "unsafe-inline", { host = "https://cdn.example.com" }]
                upgrade-insecure-requests = true
            "#,
            FileFormat::Toml,
        )
        .unwrap();

    let built = CspHeader::enforce(ContentSecurityPolicy {
        script_src: Some(SourceList::from([
            Source::SelfOrigin,
            Source::UnsafeInline,
            Source::host("https://cdn.example.com"),
        ])),
        upgrade_insecure_requests: true,
        ..Default::default()
    });

    assert_eq!(loaded, built);
}
