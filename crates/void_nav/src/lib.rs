//! # void_nav - Navigation for Void Engine
//!
//! Tells agents where they can walk and how to get somewhere:
//! - [`NavMesh`]: convex walkable regions, region lookup, pathfinding and
//!   movement clamping
//! - [`CellSpacePartitioning`]: uniform grid answering "what is near me"
//! - [`NavEntity`]: loading any of the above from tagged JSON
//!
//! ## Example
//!
//! ```
//! use void_nav::prelude::*;
//!
//! let square = |x: f32| [
//!     Vec3::new(x, 0.0, 0.0),
//!     Vec3::new(x, 0.0, 1.0),
//!     Vec3::new(x + 1.0, 0.0, 1.0),
//!     Vec3::new(x + 1.0, 0.0, 0.0),
//! ];
//! let mesh = NavMesh::from_polygons(&[square(0.0), square(1.0)], NavMeshConfig::default()).unwrap();
//!
//! let path = mesh.find_path(Vec3::new(0.5, 0.0, 0.5), Vec3::new(1.5, 0.0, 0.5)).unwrap();
//! assert_eq!(path.regions, vec![0, 1]);
//!
//! let step = mesh.clamp_movement(1, Vec3::new(1.5, 0.0, 0.5), Vec3::new(3.0, 0.0, 0.5)).unwrap();
//! assert_eq!(step.position, Vec3::new(2.0, 0.0, 0.5));
//! ```

pub mod config;
pub mod error;
pub mod navmesh;
pub mod partitioning;
pub mod path;
pub mod registry;

pub use config::NavMeshConfig;
pub use error::{NavError, Result};
pub use navmesh::{ClampedMovement, NavMesh};
pub use partitioning::{Cell, CellSpacePartitioning};
pub use path::NavPath;
pub use registry::NavEntity;

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::config::NavMeshConfig;
    pub use crate::error::{NavError, Result};
    pub use crate::navmesh::{ClampedMovement, NavMesh};
    pub use crate::partitioning::{Cell, CellSpacePartitioning};
    pub use crate::path::NavPath;
    pub use crate::registry::NavEntity;
    pub use void_core::{Id, JsonEntity};
    pub use void_math::Vec3;
}
