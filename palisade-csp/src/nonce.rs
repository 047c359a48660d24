//! Per-response nonces.

use crate::source::Source;
use base64::{Engine, engine::general_purpose::STANDARD};
use palisade_log::trace;
use rand::Rng;
use std::fmt;

/// Number of random bytes in a generated nonce (128 bits)
pub const NONCE_BYTES: usize = 16;

/// A base64 nonce token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nonce(String);

impl Nonce {
    /// Generate a fresh random nonce
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let random_bytes: [u8; NONCE_BYTES] = rng.r#gen();
        trace!(target: "palisade::csp", "Generated {}-byte nonce", NONCE_BYTES);
        Self::from_bytes(random_bytes)
    }

    /// Encode caller-provided bytes as a nonce
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self(STANDARD.encode(bytes))
    }

    /// The encoded token, without the `'nonce-` wrapper
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Source that allow-lists this nonce
    pub fn to_source(&self) -> Source {
        Source::Nonce(self.0.clone())
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Nonce> for Source {
    fn from(nonce: Nonce) -> Self {
        Source::Nonce(nonce.0)
    }
}
