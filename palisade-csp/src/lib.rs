//! Typed Content-Security-Policy construction for Palisade
//!
//! Builds the value of a `Content-Security-Policy` header from a strongly
//! typed description of allowed sources. Data flows one way:
//! [`Source`] → [`SourceList`] → [`ContentSecurityPolicy`] → header string.
//!
//! # Example
//!
//! ```
//! use palisade_csp::{ContentSecurityPolicy, CspHeader, HashAlgorithm, Source, SourceList};
//!
//! let policy = ContentSecurityPolicy {
//!     script_src: Some(SourceList::from([
//!         Source::SelfOrigin,
//!         Source::hash_of(HashAlgorithm::Sha256, "alert('Hello, world.');"),
//!     ])),
//!     object_src: Some(SourceList::none()),
//!     ..Default::default()
//! };
//!
//! let (name, value) = CspHeader::enforce(policy).to_pair();
//! assert_eq!(name, "Content-Security-Policy");
//! assert_eq!(
//!     value,
//!     "object-src: 'none'; script-src: 'self' 'sha256-qznLcsROx4GACP2dm0UCKCzCG+HiZ1guq6ZZDob/Tng='"
//! );
//! ```

pub mod directive;
pub mod error;
pub mod hash;
pub mod header;
pub mod nonce;
pub mod policy;
pub mod policy_url;
pub mod source;
pub mod source_list;

pub use directive::{Directive, DirectiveKind};
pub use error::{CspError, Result};
pub use hash::HashAlgorithm;
pub use header::{CSP_HEADER, CSP_REPORT_ONLY_HEADER, CspHeader, HeaderMode};
pub use nonce::Nonce;
pub use policy::{ContentSecurityPolicy, DirectiveValue, MimeType};
pub use policy_url::PolicyUrl;
pub use source::Source;
pub use source_list::SourceList;
