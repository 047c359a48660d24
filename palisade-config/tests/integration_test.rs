//! Integration tests for palisade-config

use palisade_config::*;
use palisade_csp::{CSP_HEADER, CSP_REPORT_ONLY_HEADER, HeaderMode};
use pretty_assertions::assert_eq;
use std::env;
use std::fs;

const TOML_POLICY: &str = r#"
report-only = false
default-src = ["self"]
script-src = ["self", { nonce = "abc123" }, { host = "cdn.example.com" }]
style-src = [{ hash = { algorithm = "sha256", digest = "qznLcsROx4GACP2dm0UCKCzCG+HiZ1guq6ZZDob/Tng=" } }]
object-src = "none"
img-src = "all"
base-uri = "https://example.com"
report-uri = "https://example.com/csp"
plugin-types = ["application/pdf"]
upgrade-insecure-requests = true
"#;

const JSON_POLICY: &str = r#"{
    "report-only": false,
    "default-src": ["self"],
    "script-src": ["self", {"nonce": "abc123"}, {"host": "cdn.example.com"}],
    "style-src": [{"hash": {"algorithm": "sha256", "digest": "qznLcsROx4GACP2dm0UCKCzCG+HiZ1guq6ZZDob/Tng="}}],
    "object-src": "none",
    "img-src": "all",
    "base-uri": "https://example.com",
    "report-uri": "https://example.com/csp",
    "plugin-types": ["application/pdf"],
    "upgrade-insecure-requests": true
}"#;

const EXPECTED: &str = "default-src: 'self'; \
    base-uri: https://example.com; \
    img-src: *; \
    object-src: 'none'; \
    plugin-types: application/pdf; \
    report-uri: https://example.com/csp; \
    script-src: 'self' 'nonce-abc123' cdn.example.com; \
    style-src: 'sha256-qznLcsROx4GACP2dm0UCKCzCG+HiZ1guq6ZZDob/Tng='; \
    upgrade-insecure-requests";

#[test]
fn test_toml_and_json_render_identically() {
    let manager = ConfigManager::new().without_env();

    let from_toml = manager.load_str(TOML_POLICY, FileFormat::Toml).unwrap();
    let from_json = manager.load_str(JSON_POLICY, FileFormat::Json).unwrap();

    assert_eq!(from_toml, from_json);
    assert_eq!(from_toml.value(), EXPECTED);
    assert_eq!(from_toml.name(), CSP_HEADER);
}

#[test]
fn test_load_file_detects_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("csp.toml");
    fs::write(&path, TOML_POLICY).unwrap();

    let header = ConfigManager::new().without_env().load_file(&path).unwrap();
    assert_eq!(header.value(), EXPECTED);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let result = ConfigManager::new().without_env().load_file(&path);
    match result {
        Err(ConfigError::LoadError(msg)) => assert!(msg.contains("missing.json")),
        other => panic!("expected LoadError, got {:?}", other),
    }
}

#[test]
fn test_env_overrides_applied_on_load() {
    let manager = ConfigManager::with_prefix("PALISADE_IT_OVERRIDE");

    unsafe {
        env::set_var("PALISADE_IT_OVERRIDE_REPORT_ONLY", "true");
        env::set_var(
            "PALISADE_IT_OVERRIDE_REPORT_URI",
            "https://reports.example.com/csp",
        );
    }

    let header = manager
        .load_str(r#"{"object-src": "none"}"#, FileFormat::Json)
        .unwrap();

    assert_eq!(header.mode, HeaderMode::ReportOnly);
    assert_eq!(header.name(), CSP_REPORT_ONLY_HEADER);
    assert_eq!(
        header.value(),
        "object-src: 'none'; report-uri: https://reports.example.com/csp"
    );

    unsafe {
        env::remove_var("PALISADE_IT_OVERRIDE_REPORT_ONLY");
        env::remove_var("PALISADE_IT_OVERRIDE_REPORT_URI");
    }
}

#[test]
fn test_invalid_env_override_fails_load() {
    let manager = ConfigManager::with_prefix("PALISADE_IT_BAD");

    unsafe {
        env::set_var("PALISADE_IT_BAD_REPORT_URI", "/relative");
    }

    let result = manager.load_str("{}", FileFormat::Json);
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));

    unsafe {
        env::remove_var("PALISADE_IT_BAD_REPORT_URI");
    }
}

#[test]
fn test_env_loader_reads_process_env() {
    let loader = EnvLoader::new("PALISADE_IT_LOADER");

    unsafe {
        env::set_var("PALISADE_IT_LOADER_BASE_URI", "https://example.com");
    }

    assert_eq!(loader.load_var("base_uri").unwrap(), "https://example.com");

    let mut config = PolicyConfig::default();
    assert_eq!(loader.apply(&mut config).unwrap(), 1);
    assert_eq!(config.base_uri.as_deref(), Some("https://example.com"));

    unsafe {
        env::remove_var("PALISADE_IT_LOADER_BASE_URI");
    }
}

#[cfg(unix)]
#[test]
fn test_non_utf8_environment_is_skipped() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let manager = ConfigManager::with_prefix("PALISADE_IT_UTF8");

    unsafe {
        env::set_var("PALISADE_IT_UTF8_STRAY", OsString::from_vec(vec![0xff]));
        env::set_var("PALISADE_IT_UTF8_UPGRADE_INSECURE_REQUESTS", "true");
    }

    let header = manager
        .load_str(r#"{"default-src": ["self"]}"#, FileFormat::Json)
        .unwrap();
    assert_eq!(
        header.value(),
        "default-src: 'self'; upgrade-insecure-requests"
    );

    unsafe {
        env::remove_var("PALISADE_IT_UTF8_STRAY");
        env::remove_var("PALISADE_IT_UTF8_UPGRADE_INSECURE_REQUESTS");
    }
}

#[test]
fn test_dotenv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "PALISADE_IT_DOTENV_UPGRADE_INSECURE_REQUESTS=1\n").unwrap();

    let manager = ConfigManager::with_prefix("PALISADE_IT_DOTENV");
    manager.load_dotenv(path.to_str()).unwrap();

    let header = manager.load_str("{}", FileFormat::Json).unwrap();
    assert_eq!(header.value(), "upgrade-insecure-requests");

    unsafe {
        env::remove_var("PALISADE_IT_DOTENV_UPGRADE_INSECURE_REQUESTS");
    }
}

#[test]
fn test_empty_list_and_none_stay_distinct() {
    let manager = ConfigManager::new().without_env();
    let header = manager
        .load_str(r#"{"img-src": [], "object-src": "none"}"#, FileFormat::Json)
        .unwrap();

    assert_eq!(header.value(), "img-src: ; object-src: 'none'");
}

#[test]
fn test_validated_config_rejects_bad_hash_on_conversion() {
    let loader = ConfigLoader::new(FileFormat::Json);
    let config = loader
        .parse(r#"{"script-src": [{"hash": {"algorithm": "sha256", "digest": "YWJj"}}]}"#)
        .unwrap();

    assert!(config.validate().is_ok());
    assert!(matches!(
        config.to_header(),
        Err(ConfigError::InvalidDigest { .. })
    ));

    let config = loader
        .parse(r#"{"script-src": [{"hash": {"algorithm": "s-h-a-2-5-6", "digest": "YWJj"}}]}"#)
        .unwrap();

    assert!(config.validate().is_ok());
    assert!(matches!(
        config.to_header(),
        Err(ConfigError::Csp(palisade_csp::CspError::UnknownHashAlgorithm(_)))
    ));
}
