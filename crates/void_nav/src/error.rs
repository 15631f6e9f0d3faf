//! Navigation error types

use thiserror::Error;

/// Errors raised while building or loading navigation data
#[derive(Error, Debug)]
pub enum NavError {
    #[error("Navigation mesh has no usable regions")]
    EmptyMesh,

    #[error("Index buffer length {0} is not a multiple of 3")]
    MalformedIndices(usize),

    #[error("Vertex index {index} out of range ({count} vertices)")]
    InvalidVertexIndex { index: u32, count: usize },

    #[error(transparent)]
    Core(#[from] void_core::Error),
}

impl From<serde_json::Error> for NavError {
    fn from(e: serde_json::Error) -> Self {
        NavError::Core(e.into())
    }
}

/// Result type for navigation operations
pub type Result<T> = std::result::Result<T, NavError>;

impl From<NavError> for void_core::Error {
    fn from(e: NavError) -> Self {
        match e {
            NavError::Core(inner) => inner,
            other => void_core::Error::Message(other.to_string().into_boxed_str()),
        }
    }
}
