//! Absolute URLs for `base-uri` and `report-uri`.

use crate::error::{CspError, Result};
use std::fmt;
use std::str::FromStr;

/// An absolute URL, rendered exactly as the caller wrote it.
///
/// The text is checked with the `url` crate but not normalised, so
/// `https://example.com` keeps its missing trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PolicyUrl(String);

impl PolicyUrl {
    /// Validate that `input` is an absolute URL and keep it verbatim
    pub fn parse(input: impl Into<String>) -> Result<Self> {
        let input = input.into();
        match url::Url::parse(&input) {
            Ok(_) => Ok(Self(input)),
            Err(url::ParseError::RelativeUrlWithoutBase) => Err(CspError::RelativeUrl(input)),
            Err(e) => Err(CspError::InvalidUrl {
                url: input,
                reason: e.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolicyUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PolicyUrl {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for PolicyUrl {
    type Error = CspError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<url::Url> for PolicyUrl {
    fn from(url: url::Url) -> Self {
        Self(url.into())
    }
}
