//! Convex polyhedra made of half-edge faces

use crate::bounds::AABB;
use crate::halfedge::{HalfEdgeId, HalfEdgeMesh, PolygonId};
use crate::vector::Vec3;
use std::collections::HashSet;

/// A closed convex solid
///
/// `vertices`, `edges` and `centroid` are derived from `faces`. Nothing tracks
/// changes to the faces: after editing `mesh` or `faces`, call
/// [`compute_unique_vertices_and_edges`](Self::compute_unique_vertices_and_edges)
/// and [`compute_centroid`](Self::compute_centroid) again.
#[derive(Clone, Debug, Default)]
pub struct Polyhedron {
    /// Arena holding the faces
    pub mesh: HalfEdgeMesh,
    /// Faces with outward facing normals
    pub faces: Vec<PolygonId>,
    /// Distinct vertex positions
    pub vertices: Vec<Vec3>,
    /// One half-edge per undirected edge
    pub edges: Vec<HalfEdgeId>,
    /// Average of the face centroids
    pub centroid: Vec3,
}

impl Polyhedron {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from face contours wound counter-clockwise seen from outside
    pub fn from_contours<C: AsRef<[Vec3]>>(contours: &[C]) -> Self {
        let mut polyhedron = Self::new();
        for contour in contours {
            if polyhedron.add_face(contour.as_ref()).is_none() {
                log::warn!("Skipping polyhedron face with fewer than three vertices");
            }
        }
        polyhedron.mesh.link_all_twins();
        polyhedron.compute_unique_vertices_and_edges();
        polyhedron.compute_centroid();
        polyhedron
    }

    /// Box with the extents of `aabb`
    pub fn from_aabb(aabb: &AABB) -> Self {
        let (min, max) = (aabb.min, aabb.max);
        let v = [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(min.x, max.y, max.z),
        ];

        Self::from_contours(&[
            [v[0], v[3], v[2], v[1]], // -z
            [v[4], v[5], v[6], v[7]], // +z
            [v[0], v[1], v[5], v[4]], // -y
            [v[3], v[7], v[6], v[2]], // +y
            [v[0], v[4], v[7], v[3]], // -x
            [v[1], v[2], v[6], v[5]], // +x
        ])
    }

    /// Append a face without touching the derived data
    pub fn add_face(&mut self, contour: &[Vec3]) -> Option<PolygonId> {
        let id = self.mesh.add_polygon(contour)?;
        self.faces.push(id);
        Some(id)
    }

    /// Average of the face centroids
    pub fn compute_centroid(&mut self) -> &mut Self {
        let mut sum = Vec3::ZERO;
        let mut count = 0usize;
        for polygon in self.faces.iter().filter_map(|&face| self.mesh.polygon(face)) {
            sum += polygon.centroid;
            count += 1;
        }
        self.centroid = if count > 0 { sum / count as f32 } else { Vec3::ZERO };
        self
    }

    /// Collect distinct vertices, and one half-edge per twin pair
    pub fn compute_unique_vertices_and_edges(&mut self) -> &mut Self {
        let mut seen_vertices = HashSet::new();
        let mut seen_edges = HashSet::new();
        self.vertices.clear();
        self.edges.clear();

        for &face in &self.faces {
            for edge in self.mesh.polygon_edges(face) {
                let Some(he) = self.mesh.half_edge(edge) else { continue };

                if seen_vertices.insert(he.vertex.to_bits()) {
                    self.vertices.push(he.vertex);
                }

                let twin_recorded = he.twin.is_some_and(|twin| seen_edges.contains(&twin));
                if !twin_recorded && seen_edges.insert(edge) {
                    self.edges.push(edge);
                }
            }
        }
        self
    }
}
