//! Navigation mesh
//!
//! The walkable surface is a set of convex regions stored in a
//! [`HalfEdgeMesh`]. Regions that share an edge are linked through twin
//! half-edges, and those links form the region graph searched by
//! [`NavMesh::find_path`]. Region `i` is polygon `i` of the mesh and node `i`
//! of the graph.
//!
//! Containment and movement clamping work on the ground plane (XZ); regions
//! are expected to face up.

use crate::config::NavMeshConfig;
use crate::error::{NavError, Result};
use crate::partitioning::CellSpacePartitioning;
use crate::path::NavPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use void_core::type_registry::tagged;
use void_core::JsonEntity;
use void_graph::{AStar, Edge, Euclidean, Graph, GraphSearch, Node};
use void_math::{area_xz, HalfEdgeId, HalfEdgeMesh, LineSegment, PolygonId, Vec3, AABB};

/// Result of [`NavMesh::clamp_movement`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampedMovement {
    /// Region the movement ended in
    pub region: usize,
    /// Reachable end position
    pub position: Vec3,
}

/// Navigation mesh for pathfinding and movement constraints
#[derive(Debug, Clone)]
pub struct NavMesh {
    mesh: HalfEdgeMesh,
    /// Region centroids, indexed like the regions
    centroids: Vec<Vec3>,
    /// Region adjacency, weighted by centroid distance
    graph: Graph,
    /// Region lookup grid
    spatial_index: CellSpacePartitioning<usize>,
    config: NavMeshConfig,
}

impl NavMesh {
    /// Build from convex region contours, wound counter-clockwise seen from
    /// above
    ///
    /// Neighbouring regions must share edge endpoints exactly. Contours with
    /// fewer than three vertices are skipped.
    pub fn from_polygons<C: AsRef<[Vec3]>>(contours: &[C], config: NavMeshConfig) -> Result<Self> {
        let mut mesh = HalfEdgeMesh::new();
        for (index, contour) in contours.iter().enumerate() {
            if mesh.add_polygon(contour.as_ref()).is_none() {
                log::warn!("Skipping navigation region {}: fewer than three vertices", index);
            }
        }
        Self::build(mesh, config)
    }

    /// Build from a flat `xyz` vertex buffer and a triangle index buffer
    ///
    /// Triangles without area on the ground plane are skipped.
    pub fn from_indexed(vertices: &[f32], indices: &[u32], config: NavMeshConfig) -> Result<Self> {
        if indices.len() % 3 != 0 {
            log::warn!("Rejecting navigation mesh with {} indices", indices.len());
            return Err(NavError::MalformedIndices(indices.len()));
        }

        let positions: Vec<Vec3> = vertices
            .chunks_exact(3)
            .map(|xyz| Vec3::new(xyz[0], xyz[1], xyz[2]))
            .collect();
        let vertex = |index: u32| {
            positions.get(index as usize).copied().ok_or(NavError::InvalidVertexIndex {
                index,
                count: positions.len(),
            })
        };

        let mut mesh = HalfEdgeMesh::new();
        for (triangle, corners) in indices.chunks_exact(3).enumerate() {
            let contour = [vertex(corners[0])?, vertex(corners[1])?, vertex(corners[2])?];
            if area_xz(contour[0], contour[1], contour[2]).abs() <= f32::EPSILON {
                log::warn!("Skipping degenerate triangle {}", triangle);
                continue;
            }
            mesh.add_polygon(&contour);
        }
        Self::build(mesh, config)
    }

    fn build(mut mesh: HalfEdgeMesh, config: NavMeshConfig) -> Result<Self> {
        if mesh.polygon_count() == 0 {
            return Err(NavError::EmptyMesh);
        }

        let portals = mesh.link_all_twins();
        let centroids: Vec<Vec3> = mesh.polygons().map(|(_, polygon)| polygon.centroid).collect();

        let mut graph = Graph::directed();
        for region in 0..centroids.len() {
            graph.add_node(Node::new(region));
        }
        for (id, _) in mesh.polygons() {
            for edge in mesh.polygon_edges(id) {
                let Some(neighbor) = mesh.twin_polygon(edge) else { continue };
                if neighbor == id {
                    continue;
                }
                let (from, to) = (id.index(), neighbor.index());
                graph.add_edge(Edge::new(from, to, centroids[from].distance_to(centroids[to])));
            }
        }

        let bounds = mesh
            .polygons()
            .map(|(id, _)| mesh.polygon_aabb(id))
            .fold(AABB::EMPTY, |acc, aabb| acc.union(&aabb))
            .expand(config.spatial_padding.max(f32::EPSILON));
        let [cells_x, cells_y, cells_z] = config.spatial_cells;
        let mut spatial_index =
            CellSpacePartitioning::from_aabb(bounds, cells_x as usize, cells_y as usize, cells_z as usize);
        for (id, _) in mesh.polygons() {
            let lookup_bounds = mesh.polygon_aabb(id).expand(config.epsilon_contains_test);
            spatial_index.add_aabb(id.index(), &lookup_bounds);
        }

        log::debug!(
            "Built navigation mesh: {} regions, {} shared edges, {} graph edges",
            centroids.len(),
            portals,
            graph.get_edge_count()
        );

        Ok(Self {
            mesh,
            centroids,
            graph,
            spatial_index,
            config,
        })
    }

    pub fn region_count(&self) -> usize {
        self.centroids.len()
    }

    pub fn region_centroid(&self, region: usize) -> Option<Vec3> {
        self.centroids.get(region).copied()
    }

    /// Regions sharing an edge with `region`
    pub fn region_neighbors(&self, region: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph.edges_of(region).iter().map(|edge| edge.to)
    }

    /// Fill `result` with the boundary of a region (cleared first)
    pub fn region_contour(&self, region: usize, result: &mut Vec<Vec3>) {
        self.mesh.contour(polygon_id(region), result);
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn mesh(&self) -> &HalfEdgeMesh {
        &self.mesh
    }

    pub fn spatial_index(&self) -> &CellSpacePartitioning<usize> {
        &self.spatial_index
    }

    pub fn config(&self) -> &NavMeshConfig {
        &self.config
    }

    fn region_contains(&self, region: usize, point: Vec3) -> bool {
        let id = polygon_id(region);
        let epsilon = self.config.epsilon_contains_test;
        match self.config.height_tolerance {
            Some(tolerance) => self.mesh.contains(id, point, epsilon, tolerance),
            None => self.mesh.contains_xz(id, point, epsilon),
        }
    }

    /// Region containing `point`
    ///
    /// `current` is a hint, usually the region found last time: it and its
    /// neighbours are tested before the grid is consulted.
    pub fn get_region_for_point(&self, point: Vec3, current: Option<usize>) -> Option<usize> {
        if let Some(current) = current.filter(|&region| region < self.region_count()) {
            if self.region_contains(current, point) {
                return Some(current);
            }
            if let Some(neighbor) = self.region_neighbors(current).find(|&n| self.region_contains(n, point)) {
                return Some(neighbor);
            }
        }

        // Containment ignores height (or bounds it by a tolerance), so every
        // layer above and below the point is a candidate.
        self.spatial_index
            .get_column_indices(point)
            .filter_map(|cell| self.spatial_index.cell(cell))
            .flat_map(|cell| cell.entries.iter().copied())
            .find(|&region| self.region_contains(region, point))
    }

    /// Region whose centroid is nearest to `point`
    pub fn get_closest_region(&self, point: Vec3) -> Option<usize> {
        self.centroids
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| point.squared_distance_to(**a).total_cmp(&point.squared_distance_to(**b)))
            .map(|(region, _)| region)
    }

    /// End points of the edge leading from one region into another
    pub fn portal_edge(&self, from_region: usize, to_region: usize) -> Option<LineSegment> {
        if from_region >= self.region_count() {
            return None;
        }
        let edge = self
            .mesh
            .polygon_edges(polygon_id(from_region))
            .find(|&edge| self.mesh.twin_polygon(edge) == Some(polygon_id(to_region)))?;
        Some(LineSegment::new(self.mesh.from(edge)?, self.mesh.to(edge)?))
    }

    /// Path from `from` to `to` through region centroids
    ///
    /// `None` if either point is off the mesh or the regions are not
    /// connected.
    pub fn find_path(&self, from: Vec3, to: Vec3) -> Option<NavPath> {
        let start = self.get_region_for_point(from, None)?;
        let end = self.get_region_for_point(to, None)?;

        if start == end {
            return Some(NavPath::new(vec![from, to], vec![start]));
        }

        let mut search = AStar::new(&self.graph, start, end, Euclidean(&self.centroids));
        if !search.search() {
            log::debug!("No region path from {} to {}", start, end);
            return None;
        }

        let regions = search.get_path();
        let Some(waypoints) = self.waypoints_through(from, to, &regions) else {
            log::debug!("Search from {} to {} gave no usable region path", start, end);
            return None;
        };
        Some(NavPath::new(waypoints, regions))
    }

    /// `from`, the centroids of the interior regions, then `to`. `None` for
    /// fewer than two regions or an unknown region.
    fn waypoints_through(&self, from: Vec3, to: Vec3, regions: &[usize]) -> Option<Vec<Vec3>> {
        let [_, interior @ .., _] = regions else { return None };

        let mut waypoints = Vec::with_capacity(regions.len() + 1);
        waypoints.push(from);
        for &region in interior {
            waypoints.push(self.region_centroid(region)?);
        }
        waypoints.push(to);
        Some(waypoints)
    }

    /// Constrain a straight movement from `start` to `end` to the mesh
    ///
    /// `start` is expected inside `region`. The movement may pass through
    /// any number of neighbouring regions. On hitting a boundary edge the end
    /// point slides along that edge and stays on it. `None` only for an
    /// unknown region.
    pub fn clamp_movement(&self, region: usize, start: Vec3, end: Vec3) -> Option<ClampedMovement> {
        if region >= self.region_count() {
            return None;
        }

        let max_iterations = self.config.max_clamp_iterations.unwrap_or(self.region_count() + 1);
        let epsilon = self.config.epsilon_contains_test;
        let mut current = region;
        let mut from = start;

        for _ in 0..max_iterations {
            let id = polygon_id(current);
            if self.mesh.contains_xz(id, end, epsilon) {
                return Some(ClampedMovement { region: current, position: end });
            }

            let Some((t, edge)) = self.exit_edge(id, from, end) else {
                log::trace!("No exit edge found in region {}", current);
                return Some(ClampedMovement { region: current, position: end });
            };
            let crossing = from.lerp(end, t);

            match self.mesh.twin_polygon(edge) {
                Some(next) if next != id => {
                    current = next.index();
                    from = crossing;
                }
                _ => {
                    let position = self.slide_along(edge, end).unwrap_or(crossing);
                    return Some(ClampedMovement { region: current, position });
                }
            }
        }

        log::debug!(
            "clamp_movement stopped after {} region transitions in region {}",
            max_iterations,
            current
        );
        Some(ClampedMovement { region: current, position: from })
    }

    /// First edge of a polygon the segment leaves through, with the segment
    /// parameter of the crossing
    fn exit_edge(&self, id: PolygonId, from: Vec3, end: Vec3) -> Option<(f32, HalfEdgeId)> {
        let mut best: Option<(f32, HalfEdgeId)> = None;
        for edge in self.mesh.polygon_edges(id) {
            let (Some(a), Some(b)) = (self.mesh.from(edge), self.mesh.to(edge)) else { continue };

            let s1 = area_xz(a, b, end);
            if s1 >= 0.0 {
                continue;
            }
            let s0 = area_xz(a, b, from);
            let t = if s0 - s1 > 0.0 { (s0 / (s0 - s1)).clamp(0.0, 1.0) } else { 0.0 };

            if best.map_or(true, |(best_t, _)| t < best_t) {
                best = Some((t, edge));
            }
        }
        best
    }

    /// Point of a wall edge closest to `end` on the ground plane
    fn slide_along(&self, edge: HalfEdgeId, end: Vec3) -> Option<Vec3> {
        let (a, b) = (self.mesh.from(edge)?, self.mesh.to(edge)?);
        let flat = LineSegment::new(a.with_y(0.0), b.with_y(0.0));
        let s = flat.closest_point_to_point_parameter(end.with_y(0.0), true);
        Some(a.lerp(b, s))
    }
}

#[inline]
fn polygon_id(region: usize) -> PolygonId {
    PolygonId(region as u32)
}

#[derive(Serialize, Deserialize)]
struct NavMeshJson {
    config: NavMeshConfig,
    regions: Vec<Vec<Vec3>>,
}

impl JsonEntity for NavMesh {
    const TYPE_NAME: &'static str = "NavMesh";

    /// Region contours and config; derived data is rebuilt on load
    fn to_json(&self) -> Value {
        let regions = (0..self.region_count())
            .map(|region| {
                let mut contour = Vec::new();
                self.region_contour(region, &mut contour);
                contour
            })
            .collect();
        tagged(
            Self::TYPE_NAME,
            &NavMeshJson {
                config: self.config.clone(),
                regions,
            },
        )
    }

    fn from_json(json: &Value) -> void_core::Result<Self> {
        let data: NavMeshJson = void_core::type_registry::decode(json, Self::TYPE_NAME)?;
        Self::from_polygons(&data.regions, data.config).map_err(Into::into)
    }
}
