//! Convex polygons stored in a [`HalfEdgeMesh`]
//!
//! A polygon is represented by one of its half-edges; the rest of the
//! boundary is reached by following `next`. The winding of the contour used to
//! build a polygon decides its normal: counter-clockwise seen from the side the
//! normal should face.
//!
//! Ground-plane tests (`*_xz`) project onto the XZ plane and expect regions
//! whose normals point up (+Y).

use crate::bounds::AABB;
use crate::halfedge::{HalfEdge, HalfEdgeId, HalfEdgeMesh, PolygonId};
use crate::plane::Plane;
use crate::vector::Vec3;

/// Face record of the arena
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Polygon {
    /// Any half-edge of the boundary loop
    pub edge: Option<HalfEdgeId>,
    /// Supporting plane, from three consecutive boundary vertices
    pub plane: Plane,
    /// Average of the boundary vertices
    pub centroid: Vec3,
}

impl Default for Polygon {
    fn default() -> Self {
        Self {
            edge: None,
            plane: Plane::default(),
            centroid: Vec3::ZERO,
        }
    }
}

/// Twice the signed area of `a, b, c` projected onto XZ
///
/// Equals the Y component of `(b - a) × (c - a)`; non-negative when `c` lies
/// on the inner side of `a → b` for an upward facing polygon.
#[inline]
pub fn area_xz(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    (c.x - a.x) * (b.z - a.z) - (b.x - a.x) * (c.z - a.z)
}

/// `c` is on the inner side of `a → b`, or on the line itself
#[inline]
pub fn left_on_xz(a: Vec3, b: Vec3, c: Vec3) -> bool {
    area_xz(a, b, c) >= 0.0
}

/// Walk over the half-edges of one polygon, starting at its first edge
///
/// The walk stops after returning to the first edge, at a missing `next` link,
/// or after visiting as many edges as the arena holds.
pub struct PolygonEdges<'a> {
    mesh: &'a HalfEdgeMesh,
    first: Option<HalfEdgeId>,
    current: Option<HalfEdgeId>,
    remaining: usize,
}

impl<'a> Iterator for PolygonEdges<'a> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.current?;
        self.remaining -= 1;
        let next = self.mesh.half_edge(current).and_then(|he| he.next);
        self.current = match next {
            Some(next) if Some(next) != self.first => Some(next),
            _ => None,
        };
        Some(current)
    }
}

impl HalfEdgeMesh {
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn polygon(&self, id: PolygonId) -> Option<&Polygon> {
        self.polygons.get(id.index())
    }

    pub fn polygons(&self) -> impl Iterator<Item = (PolygonId, &Polygon)> {
        self.polygons
            .iter()
            .enumerate()
            .map(|(i, polygon)| (PolygonId(i as u32), polygon))
    }

    /// Build a polygon from an ordered contour
    ///
    /// Creates the half-edge ring, points every half-edge back at the polygon
    /// and computes plane and centroid. Returns `None` for fewer than three
    /// vertices. Twins are not linked here; see
    /// [`link_all_twins`](HalfEdgeMesh::link_all_twins).
    pub fn add_polygon(&mut self, contour: &[Vec3]) -> Option<PolygonId> {
        if contour.len() < 3 {
            log::debug!("Ignoring contour with {} vertices", contour.len());
            return None;
        }

        let id = PolygonId(self.polygons.len() as u32);
        let first = HalfEdgeId(self.half_edges.len() as u32);
        let count = contour.len() as u32;

        for (i, &vertex) in contour.iter().enumerate() {
            let i = i as u32;
            self.half_edges.push(HalfEdge {
                vertex,
                next: Some(HalfEdgeId(first.0 + (i + 1) % count)),
                prev: Some(HalfEdgeId(first.0 + (i + count - 1) % count)),
                twin: None,
                polygon: Some(id),
            });
        }

        self.polygons.push(Polygon {
            edge: Some(first),
            ..Polygon::default()
        });
        self.compute_plane(id);
        self.compute_centroid(id);
        Some(id)
    }

    /// Boundary half-edges of a polygon in loop order
    pub fn polygon_edges(&self, id: PolygonId) -> PolygonEdges<'_> {
        let first = self.polygon(id).and_then(|polygon| polygon.edge);
        PolygonEdges {
            mesh: self,
            first,
            current: first,
            remaining: self.half_edges.len(),
        }
    }

    /// Fill `result` with the boundary vertices of a polygon (cleared first)
    pub fn contour(&self, id: PolygonId, result: &mut Vec<Vec3>) {
        result.clear();
        result.extend(self.polygon_edges(id).filter_map(|edge| self.from(edge)));
    }

    /// Recompute and store the centroid
    pub fn compute_centroid(&mut self, id: PolygonId) -> Option<Vec3> {
        let mut sum = Vec3::ZERO;
        let mut count = 0usize;
        for edge in self.polygon_edges(id) {
            if let Some(vertex) = self.from(edge) {
                sum += vertex;
                count += 1;
            }
        }
        if count == 0 {
            return None;
        }
        let centroid = sum / count as f32;
        self.polygons.get_mut(id.index())?.centroid = centroid;
        Some(centroid)
    }

    /// Recompute and store the supporting plane
    pub fn compute_plane(&mut self, id: PolygonId) -> Option<Plane> {
        let first = self.polygon(id)?.edge?;
        let second = self.half_edge(first)?.next?;
        let third = self.half_edge(second)?.next?;
        let plane = Plane::from_points(self.from(first)?, self.from(second)?, self.from(third)?);
        self.polygons.get_mut(id.index())?.plane = plane;
        Some(plane)
    }

    /// Bounding box of the polygon boundary
    pub fn polygon_aabb(&self, id: PolygonId) -> AABB {
        self.polygon_edges(id)
            .filter_map(|edge| self.from(edge))
            .fold(AABB::EMPTY, AABB::expand_to_include)
    }

    /// Convexity of the XZ projection; `ccw` selects the expected winding
    pub fn is_convex(&self, id: PolygonId, ccw: bool) -> bool {
        let mut any = false;
        for edge in self.polygon_edges(id) {
            let (Some(v1), Some(v2)) = (self.from(edge), self.to(edge)) else {
                return false;
            };
            let Some(v3) = self.half_edge(edge).and_then(|he| he.next).and_then(|next| self.to(next)) else {
                return false;
            };
            let convex = if ccw { left_on_xz(v1, v2, v3) } else { left_on_xz(v3, v2, v1) };
            if !convex {
                return false;
            }
            any = true;
        }
        any
    }

    /// Ground-plane containment test
    ///
    /// `epsilon` is a distance tolerance: points up to `epsilon` outside an
    /// edge still count as inside.
    pub fn contains_xz(&self, id: PolygonId, point: Vec3, epsilon: f32) -> bool {
        let mut any = false;
        for edge in self.polygon_edges(id) {
            let (Some(a), Some(b)) = (self.from(edge), self.to(edge)) else {
                return false;
            };
            let edge_length = (b - a).with_y(0.0).length();
            if edge_length <= f32::EPSILON {
                continue;
            }
            if area_xz(a, b, point) / edge_length < -epsilon {
                return false;
            }
            any = true;
        }
        any
    }

    /// Ground-plane containment plus a limit on the distance to the
    /// polygon's plane
    pub fn contains(&self, id: PolygonId, point: Vec3, epsilon: f32, max_plane_distance: f32) -> bool {
        let Some(polygon) = self.polygon(id) else {
            return false;
        };
        self.contains_xz(id, point, epsilon)
            && polygon.plane.distance_to_point(point).abs() <= max_plane_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn unit_square(mesh: &mut HalfEdgeMesh) -> PolygonId {
        mesh.add_polygon(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_add_polygon_builds_closed_ring() {
        let mut mesh = HalfEdgeMesh::new();
        let id = unit_square(&mut mesh);

        let edges: Vec<_> = mesh.polygon_edges(id).collect();
        assert_eq!(edges.len(), 4);

        let first = edges[0];
        let mut edge = first;
        for _ in 0..4 {
            assert_eq!(mesh.half_edge(edge).unwrap().polygon, Some(id));
            edge = mesh.half_edge(edge).unwrap().next.unwrap();
        }
        assert_eq!(edge, first);
    }

    #[test]
    fn test_plane_and_centroid() {
        let mut mesh = HalfEdgeMesh::new();
        let id = unit_square(&mut mesh);
        let polygon = mesh.polygon(id).unwrap();

        assert_abs_diff_eq!(polygon.plane.normal.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(polygon.plane.normal.y, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(polygon.plane.normal.z, 0.0, epsilon = 1e-6);
        assert_relative_eq!(polygon.centroid.x, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(polygon.centroid.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(polygon.centroid.z, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_contour_and_aabb() {
        let mut mesh = HalfEdgeMesh::new();
        let id = unit_square(&mut mesh);

        let mut contour = vec![Vec3::ONE];
        mesh.contour(id, &mut contour);
        assert_eq!(contour.len(), 4);
        assert_eq!(contour[0], Vec3::ZERO);

        let aabb = mesh.polygon_aabb(id);
        assert_eq!(aabb.min, Vec3::ZERO);
        assert_eq!(aabb.max, Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_contains_xz() {
        let mut mesh = HalfEdgeMesh::new();
        let id = unit_square(&mut mesh);

        assert!(mesh.contains_xz(id, Vec3::new(0.5, 7.0, 0.5), 1e-3));
        assert!(mesh.contains_xz(id, Vec3::new(1.0, 0.0, 0.5), 1e-3));
        assert!(!mesh.contains_xz(id, Vec3::new(1.5, 0.0, 0.5), 1e-3));
        assert!(!mesh.contains(id, Vec3::new(0.5, 7.0, 0.5), 1e-3, 0.5));
        assert!(mesh.contains(id, Vec3::new(0.5, 0.1, 0.5), 1e-3, 0.5));
    }

    #[test]
    fn test_convexity() {
        let mut mesh = HalfEdgeMesh::new();
        let square = unit_square(&mut mesh);
        let dart = mesh
            .add_polygon(&[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 2.0),
                Vec3::new(0.5, 0.0, 0.5),
                Vec3::new(2.0, 0.0, 0.0),
            ])
            .unwrap();

        assert!(mesh.is_convex(square, true));
        assert!(!mesh.is_convex(square, false));
        assert!(!mesh.is_convex(dart, true));
    }

    #[test]
    fn test_link_all_twins_between_neighbours() {
        let mut mesh = HalfEdgeMesh::new();
        let left = unit_square(&mut mesh);
        let right = mesh
            .add_polygon(&[
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(2.0, 0.0, 1.0),
                Vec3::new(2.0, 0.0, 0.0),
            ])
            .unwrap();

        assert_eq!(mesh.link_all_twins(), 1);

        let shared: Vec<_> = mesh
            .polygon_edges(left)
            .filter(|&edge| mesh.twin_polygon(edge) == Some(right))
            .collect();
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn test_too_short_contour() {
        let mut mesh = HalfEdgeMesh::new();
        assert!(mesh.add_polygon(&[Vec3::ZERO, Vec3::X]).is_none());
        assert_eq!(mesh.polygon_count(), 0);
        assert_eq!(mesh.polygon_edges(PolygonId(0)).count(), 0);
    }
}
