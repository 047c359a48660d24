//! Fuzz target for policy configuration parsing.
//!
//! Feeds arbitrary documents through the JSON and TOML loaders. A document
//! that parses and validates converts into a header unless one of its hash
//! sources is malformed.

#![no_main]

use libfuzzer_sys::fuzz_target;

use palisade_config::{ConfigError, ConfigLoader, FileFormat, Validate};
use palisade_csp::{CspError, HeaderMode};

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    for format in [FileFormat::Json, FileFormat::Toml] {
        let Ok(config) = ConfigLoader::new(format).parse(content) else {
            continue;
        };

        if config.validate().is_err() {
            continue;
        }

        match config.to_header() {
            Ok(header) => {
                assert_eq!(header.mode == HeaderMode::ReportOnly, config.report_only);
                assert_eq!(header.value(), header.policy.render());
            }
            // Hash algorithm and digest are only checked during conversion
            Err(ConfigError::InvalidDigest { .. })
            | Err(ConfigError::Csp(CspError::UnknownHashAlgorithm(_))) => {}
            Err(e) => panic!("validated config failed to convert: {}", e),
        }
    }
});
