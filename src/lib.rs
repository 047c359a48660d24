// Palisade - typed Content-Security-Policy headers for Rust
//
// This library re-exports the policy model from `palisade-csp`, the logging
// helpers from `palisade-log` and, behind the `config` feature, the file and
// environment loader from `palisade-config`.

// Re-export the policy model
pub use palisade_csp::*;

// Re-export logging
pub use palisade_log;

// Re-export optional crates
#[cfg(feature = "config")]
pub use palisade_config;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ContentSecurityPolicy,
        CspError,
        CspHeader,
        Directive,
        HashAlgorithm,
        HeaderMode,
        Nonce,
        PolicyUrl,
        Source,
        SourceList,
    };

    #[cfg(feature = "config")]
    pub use palisade_config::{ConfigManager, FileFormat};
}
