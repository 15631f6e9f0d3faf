//! # void_core - Void Engine Core
//!
//! Small shared primitives used by every navigation crate:
//! - **Ids**: opaque entity identifiers used as weak references
//! - **Errors**: one error type for invalid input and failed deserialization
//! - **Type registry**: `type`-tagged JSON entities and a registry of their
//!   constructors, known at build time
//!
//! ## Philosophy
//! Nothing here holds process-wide mutable state. Every structure built on top
//! of these primitives is self-contained and can be tested in isolation.

pub mod error;
pub mod id;
pub mod type_registry;

pub use error::*;
pub use id::*;
pub use type_registry::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::id::{Id, Identified};
    pub use crate::type_registry::{JsonEntity, TypeRegistry};
}
