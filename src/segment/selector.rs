//! Field selectors and their resolution to a field position.
//!
//! A name is looked up in the layout first (verbatim, then in snake_case),
//! and only then matched against the positional pattern (`e7`, `element 7`,
//! `field_7`). Segments routinely carry more positions than a layout names.

use std::fmt;
use std::sync::LazyLock;

use convert_case::{Case, Casing};
use regex::Regex;

use crate::error::ResolutionError;
use crate::layout::SegmentLayout;

#[allow(clippy::expect_used)]
static POSITIONAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:e|element|field)[ _]?(\d+)$").expect("valid regex")
});

/// Addresses one field of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSelector<'a> {
    /// Symbolic name, resolved through the segment layout.
    Name(&'a str),
    /// Raw 0-based position.
    Index(usize),
}

impl<'a> From<&'a str> for FieldSelector<'a> {
    fn from(name: &'a str) -> Self {
        FieldSelector::Name(name)
    }
}

impl<'a> From<&'a String> for FieldSelector<'a> {
    fn from(name: &'a String) -> Self {
        FieldSelector::Name(name.as_str())
    }
}

impl From<usize> for FieldSelector<'_> {
    fn from(index: usize) -> Self {
        FieldSelector::Index(index)
    }
}

impl fmt::Display for FieldSelector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSelector::Name(name) => write!(f, "{}", name),
            FieldSelector::Index(index) => write!(f, "#{}", index),
        }
    }
}

/// Numeric position of a positional reference such as `e7` or `element 7`.
pub fn positional_index(name: &str) -> Option<usize> {
    POSITIONAL_PATTERN
        .captures(name.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Resolve a selector against a layout.
///
/// `segment` names the segment in the error when resolution fails.
pub fn resolve(
    layout: &SegmentLayout,
    segment: &str,
    selector: FieldSelector<'_>,
) -> Result<usize, ResolutionError> {
    let name = match selector {
        FieldSelector::Index(index) => return Ok(index),
        FieldSelector::Name(name) => name,
    };

    if let Some(index) = layout.index_of(name) {
        return Ok(index);
    }

    let snake = name.to_case(Case::Snake);
    if let Some(index) = layout.index_of(&snake) {
        return Ok(index);
    }

    positional_index(name).ok_or_else(|| ResolutionError::UnknownField {
        segment: segment.to_string(),
        field: name.to_string(),
    })
}
