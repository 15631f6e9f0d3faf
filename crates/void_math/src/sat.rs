//! Separating axis test for convex polyhedra
//!
//! Candidate axes are tried in three phases, returning as soon as one of them
//! separates the two solids:
//!
//! 1. face normals of A
//! 2. face normals of B
//! 3. cross products of an edge of A with an edge of B, restricted to edge
//!    pairs whose arcs cross on the Gauss map (they form a face of the
//!    Minkowski difference)
//!
//! Both polyhedra need outward wound faces with linked twins, and up to date
//! derived vertex and edge lists.

use crate::halfedge::HalfEdgeId;
use crate::polyhedron::Polyhedron;
use crate::vector::Vec3;

/// Separating axis tester
#[derive(Clone, Copy, Debug)]
pub struct Sat {
    /// Edge-pair axes shorter than this are treated as parallel and skipped
    pub epsilon: f32,
}

impl Default for Sat {
    fn default() -> Self {
        Self { epsilon: 1e-4 }
    }
}

impl Sat {
    pub fn new(epsilon: f32) -> Self {
        Self { epsilon }
    }

    /// Whether the two convex polyhedra overlap (touching counts)
    pub fn intersects(&self, a: &Polyhedron, b: &Polyhedron) -> bool {
        if self.check_face_directions(a, b) {
            return false;
        }
        if self.check_face_directions(b, a) {
            return false;
        }
        if self.check_edge_directions(a, b) {
            return false;
        }
        true
    }

    /// Some face plane of `a` has all of `b` strictly in front of it
    fn check_face_directions(&self, a: &Polyhedron, b: &Polyhedron) -> bool {
        for polygon in a.faces.iter().filter_map(|&face| a.mesh.polygon(face)) {
            let plane = polygon.plane;
            let Some(support) = support_vertex(b, -plane.normal) else {
                return false;
            };
            if plane.distance_to_point(support) > 0.0 {
                return true;
            }
        }
        false
    }

    fn check_edge_directions(&self, a: &Polyhedron, b: &Polyhedron) -> bool {
        let min_axis_sq = self.epsilon * self.epsilon;

        for &edge_a in &a.edges {
            let Some(direction_a) = a.mesh.direction(edge_a) else { continue };

            for &edge_b in &b.edges {
                let Some(direction_b) = b.mesh.direction(edge_b) else { continue };

                if !is_minkowski_face(a, edge_a, direction_a, b, edge_b, direction_b) {
                    continue;
                }

                let axis = direction_a.cross(direction_b);
                if axis.length_squared() < min_axis_sq {
                    continue;
                }

                let (min_a, max_a) = project(a, axis);
                let (min_b, max_b) = project(b, axis);
                if max_a < min_b || max_b < min_a {
                    return true;
                }
            }
        }
        false
    }
}

/// Vertex of `polyhedron` furthest along `direction`
fn support_vertex(polyhedron: &Polyhedron, direction: Vec3) -> Option<Vec3> {
    let mut best: Option<(f32, Vec3)> = None;
    for &vertex in &polyhedron.vertices {
        let projection = vertex.dot(direction);
        if best.map_or(true, |(max, _)| projection > max) {
            best = Some((projection, vertex));
        }
    }
    best.map(|(_, vertex)| vertex)
}

/// Interval covered by the vertices of `polyhedron` along `axis`
fn project(polyhedron: &Polyhedron, axis: Vec3) -> (f32, f32) {
    polyhedron
        .vertices
        .iter()
        .map(|&vertex| vertex.dot(axis))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), d| (min.min(d), max.max(d)))
}

/// Normals of the two faces meeting at an edge: its own face first
fn adjacent_normals(polyhedron: &Polyhedron, edge: HalfEdgeId) -> Option<(Vec3, Vec3)> {
    let mesh = &polyhedron.mesh;
    let he = mesh.half_edge(edge)?;
    let own = mesh.polygon(he.polygon?)?.plane.normal;
    let other = mesh.polygon(mesh.twin_polygon(edge)?)?.plane.normal;
    Some((own, other))
}

/// The arcs of both edges on the Gauss map intersect
///
/// An edge of a convex polyhedron already points along the cross product of
/// its adjacent face normals, so the edge directions stand in for the arc
/// plane normals in the triple products. B's normals are negated for the
/// Minkowski difference.
fn is_minkowski_face(
    a: &Polyhedron,
    edge_a: HalfEdgeId,
    direction_a: Vec3,
    b: &Polyhedron,
    edge_b: HalfEdgeId,
    direction_b: Vec3,
) -> bool {
    let (Some((na, nb)), Some((nc, nd))) = (adjacent_normals(a, edge_a), adjacent_normals(b, edge_b)) else {
        return false;
    };
    let (nc, nd) = (-nc, -nd);

    let cba = nc.dot(direction_a);
    let dba = nd.dot(direction_a);
    let adc = na.dot(direction_b);
    let bdc = nb.dot(direction_b);

    cba * dba < 0.0 && adc * bdc < 0.0 && cba * bdc > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::AABB;

    fn cube_at(center: Vec3) -> Polyhedron {
        Polyhedron::from_aabb(&AABB::from_center_half_extents(center, Vec3::splat(0.5)))
    }

    #[test]
    fn test_overlapping_cubes() {
        let sat = Sat::default();
        assert!(sat.intersects(&cube_at(Vec3::ZERO), &cube_at(Vec3::new(0.5, 0.0, 0.0))));
    }

    #[test]
    fn test_separated_cubes() {
        let sat = Sat::default();
        assert!(!sat.intersects(&cube_at(Vec3::ZERO), &cube_at(Vec3::new(2.0, 0.0, 0.0))));
    }

    #[test]
    fn test_touching_cubes_intersect() {
        let sat = Sat::default();
        assert!(sat.intersects(&cube_at(Vec3::ZERO), &cube_at(Vec3::new(1.0, 0.0, 0.0))));
    }

    #[test]
    fn test_support_vertex() {
        let cube = cube_at(Vec3::ZERO);
        let support = support_vertex(&cube, Vec3::new(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(support, Vec3::splat(0.5));
        assert!(support_vertex(&Polyhedron::new(), Vec3::X).is_none());
    }
}
