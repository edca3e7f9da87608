//! Error types for message parsing, field resolution and configuration.
//!
//! Malformed structure is rejected; unknown shape is not. An unrecognized
//! segment type is never an error, it degrades to the generic layout.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning raw text into a [`crate::Message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was neither a string nor a list of strings.
    #[error("Invalid input: expected a string or a list of strings, got {0}")]
    InvalidInput(String),

    /// Splitting the input produced no segment chunks at all.
    #[error("Input contains no segments")]
    NoSegments,

    /// A segment chunk could not be split into fields.
    #[error("Malformed segment: {0:?}")]
    MalformedSegment(String),

    /// A segment split produced zero fields.
    #[error("Segment has no fields")]
    EmptySegment,
}

/// Errors raised when a field selector cannot be mapped to a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// The name is neither declared by the layout nor a positional reference.
    #[error("Unknown field '{field}' for segment '{segment}'")]
    UnknownField { segment: String, field: String },

    /// A write targeted a position past [`crate::segment::MAX_FIELD_INDEX`].
    #[error("Field index {index} is out of range for segment '{segment}'")]
    IndexOutOfRange { segment: String, index: usize },
}

/// Errors raised while loading parser configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

/// Crate-level error wrapping every failure kind.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
