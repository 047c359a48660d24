//! Source lists.
//!
//! A source list is rendered once, at construction, and kept as text.
//! Order is preserved exactly as given: no sorting and no deduplication.
//!
//! Note that an empty list and [`SourceList::none`] are different values.
//! `'none'` blocks every load for the directive, while an empty list
//! renders a directive with no sources at all. The two are never merged.

use crate::source::Source;
use std::fmt;

/// Rendered, immutable list of sources for one directive
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceList {
    value: String,
}

impl SourceList {
    /// Render `sources` in order, separated by a single space
    pub fn new<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = Source>,
    {
        let value = sources
            .into_iter()
            .map(|source| source.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        Self { value }
    }

    /// `*`
    pub fn all() -> Self {
        Self::from_literal("*")
    }

    /// `'none'`
    pub fn none() -> Self {
        Self::from_literal("'none'")
    }

    fn from_literal(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    /// Rendered text
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// True only for a list built from no sources
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for SourceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromIterator<Source> for SourceList {
    fn from_iter<I: IntoIterator<Item = Source>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<Source>> for SourceList {
    fn from(sources: Vec<Source>) -> Self {
        Self::new(sources)
    }
}

impl<const N: usize> From<[Source; N]> for SourceList {
    fn from(sources: [Source; N]) -> Self {
        Self::new(sources)
    }
}

impl From<Source> for SourceList {
    fn from(source: Source) -> Self {
        Self::new([source])
    }
}
