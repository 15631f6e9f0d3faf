//! # void_math - Geometry Kernel
//!
//! Vector and bounds primitives plus the polygon machinery used by the
//! navigation crates:
//!
//! - [`HalfEdgeMesh`]: arena of half-edges and convex polygons
//! - [`Polyhedron`]: closed convex solid built from half-edge faces
//! - [`Sat`]: separating axis overlap test between two polyhedra

pub mod vector;
pub mod bounds;
pub mod plane;
pub mod halfedge;
pub mod polygon;
pub mod polyhedron;
pub mod sat;

pub use vector::*;
pub use bounds::*;
pub use plane::*;
pub use halfedge::*;
pub use polygon::*;
pub use polyhedron::*;
pub use sat::*;

pub mod prelude {
    pub use crate::bounds::{Sphere, AABB};
    pub use crate::halfedge::{HalfEdge, HalfEdgeId, HalfEdgeMesh, PolygonId};
    pub use crate::plane::{LineSegment, Plane};
    pub use crate::polygon::{area_xz, Polygon};
    pub use crate::polyhedron::Polyhedron;
    pub use crate::sat::Sat;
    pub use crate::vector::Vec3;
}
