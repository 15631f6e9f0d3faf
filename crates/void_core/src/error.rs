//! Error types for the core library

use crate::id::Id;
use thiserror::Error;

/// The core error type
///
/// Raised for invalid input only. Lookup misses (absent nodes, regions or
/// entities) are reported through `Option`/`bool` by the owning structures.
#[derive(Debug, Error)]
pub enum Error {
    /// A JSON object carried a `type` tag no constructor is registered for
    #[error("Type not registered: {0}")]
    UnknownType(String),

    /// A JSON object was handed to the constructor of another type
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A required field is absent or has the wrong shape
    #[error("Malformed {type_name}: missing or invalid field '{field}'")]
    MissingField { type_name: &'static str, field: &'static str },

    /// An opaque id could not be resolved to a live object
    #[error("Unresolved reference: {0}")]
    UnresolvedReference(Id),

    /// serde_json failed to (de)serialize a payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Message(Box<str>),
}

/// Result type alias
pub type Result<T> = core::result::Result<T, Error>;

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Message(s.into())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Message(s.into_boxed_str())
    }
}
