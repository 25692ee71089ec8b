//! Error types for wikivocab.

use thiserror::Error;

/// Result type alias using wikivocab's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for wikivocab operations.
///
/// Only conditions that abort a run live here. Link-level problems in the
/// source vocabulary are reported as [`crate::BuildWarning`] values instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The statement source could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// The same URI was declared as a concept more than once
    #[error("Duplicate concept declaration: {0}")]
    DuplicateConcept(String),

    /// A concept was given a second, different parent
    #[error("Concept {child} already has parent {existing}, refusing to assign {conflicting}")]
    ConflictingParent {
        child: String,
        existing: String,
        conflicting: String,
    },

    /// A graph vertex index outside `0..len`
    #[error("Vertex index {index} out of range for graph with {len} vertices")]
    VertexOutOfRange { index: usize, len: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
