//! Half-edge arena
//!
//! Half-edges and the polygons they bound live in flat vectors owned by a
//! [`HalfEdgeMesh`]. `next`, `prev`, `twin` and `polygon` are indices into
//! those vectors, so the cyclic relations of a half-edge structure never turn
//! into reference cycles.
//!
//! ```text
//!          next
//!   v0 ───────────▶ v1
//!   ▲   polygon A    │
//!   │ ◀───────────── │   twin (polygon B)
//! ```

use crate::polygon::Polygon;
use crate::vector::Vec3;
use std::collections::HashMap;

/// Index of a half-edge inside its [`HalfEdgeMesh`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HalfEdgeId(pub u32);

impl HalfEdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a polygon inside its [`HalfEdgeMesh`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PolygonId(pub u32);

impl PolygonId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One directed side of a polygon boundary
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfEdge {
    /// Origin vertex
    pub vertex: Vec3,
    /// Next half-edge around the same polygon
    pub next: Option<HalfEdgeId>,
    /// Previous half-edge around the same polygon
    pub prev: Option<HalfEdgeId>,
    /// Opposite half-edge of the neighbouring polygon, `None` on a boundary
    pub twin: Option<HalfEdgeId>,
    /// Owning polygon
    pub polygon: Option<PolygonId>,
}

impl HalfEdge {
    /// Create an unlinked half-edge starting at `vertex`
    pub fn new(vertex: Vec3) -> Self {
        Self {
            vertex,
            next: None,
            prev: None,
            twin: None,
            polygon: None,
        }
    }

    /// A half-edge without a twin lies on the mesh boundary
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.twin.is_none()
    }
}

/// Arena of half-edges and polygons
#[derive(Clone, Debug, Default)]
pub struct HalfEdgeMesh {
    pub(crate) half_edges: Vec<HalfEdge>,
    pub(crate) polygons: Vec<Polygon>,
}

impl HalfEdgeMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    pub fn half_edge(&self, id: HalfEdgeId) -> Option<&HalfEdge> {
        self.half_edges.get(id.index())
    }

    pub fn half_edge_mut(&mut self, id: HalfEdgeId) -> Option<&mut HalfEdge> {
        self.half_edges.get_mut(id.index())
    }

    pub fn half_edges(&self) -> impl Iterator<Item = (HalfEdgeId, &HalfEdge)> {
        self.half_edges
            .iter()
            .enumerate()
            .map(|(i, he)| (HalfEdgeId(i as u32), he))
    }

    /// Append a dangling half-edge; link it with [`set_next`](Self::set_next)
    pub fn add_half_edge(&mut self, vertex: Vec3) -> HalfEdgeId {
        let id = HalfEdgeId(self.half_edges.len() as u32);
        self.half_edges.push(HalfEdge::new(vertex));
        id
    }

    /// Make `next` follow `edge`, updating both `next` and `prev` links
    pub fn set_next(&mut self, edge: HalfEdgeId, next: HalfEdgeId) -> bool {
        if edge.index() >= self.half_edges.len() || next.index() >= self.half_edges.len() {
            return false;
        }
        self.half_edges[edge.index()].next = Some(next);
        self.half_edges[next.index()].prev = Some(edge);
        true
    }

    /// Pair two half-edges as twins of each other
    pub fn link_twins(&mut self, a: HalfEdgeId, b: HalfEdgeId) -> bool {
        if a == b || a.index() >= self.half_edges.len() || b.index() >= self.half_edges.len() {
            return false;
        }
        self.half_edges[a.index()].twin = Some(b);
        self.half_edges[b.index()].twin = Some(a);
        true
    }

    /// Origin position of a half-edge
    #[inline]
    pub fn from(&self, id: HalfEdgeId) -> Option<Vec3> {
        self.half_edge(id).map(|he| he.vertex)
    }

    /// End position of a half-edge, `None` while `next` is unset
    #[inline]
    pub fn to(&self, id: HalfEdgeId) -> Option<Vec3> {
        let next = self.half_edge(id)?.next?;
        self.from(next)
    }

    /// Squared length, or `-1.0` for a dangling half-edge
    pub fn squared_length(&self, id: HalfEdgeId) -> f32 {
        match (self.from(id), self.to(id)) {
            (Some(from), Some(to)) => from.squared_distance_to(to),
            _ => -1.0,
        }
    }

    /// Length, or `-1.0` for a dangling half-edge
    pub fn length(&self, id: HalfEdgeId) -> f32 {
        match (self.from(id), self.to(id)) {
            (Some(from), Some(to)) => from.distance_to(to),
            _ => -1.0,
        }
    }

    /// Unit direction from origin to end
    pub fn direction(&self, id: HalfEdgeId) -> Option<Vec3> {
        Some((self.to(id)? - self.from(id)?).normalize())
    }

    /// Polygon on the other side of a half-edge
    pub fn twin_polygon(&self, id: HalfEdgeId) -> Option<PolygonId> {
        let twin = self.half_edge(id)?.twin?;
        self.half_edge(twin)?.polygon
    }

    /// Pair every unpaired half-edge with the half-edge running the opposite
    /// way between the same two positions. Returns the number of new pairs.
    ///
    /// Positions are matched exactly, so shared vertices must come from the
    /// same source data.
    pub fn link_all_twins(&mut self) -> usize {
        let mut by_endpoints: HashMap<([u32; 3], [u32; 3]), HalfEdgeId> = HashMap::new();
        for (id, he) in self.half_edges() {
            if he.twin.is_some() {
                continue;
            }
            if let Some(to) = self.to(id) {
                by_endpoints.insert((he.vertex.to_bits(), to.to_bits()), id);
            }
        }

        let mut linked = 0;
        for index in 0..self.half_edges.len() {
            let id = HalfEdgeId(index as u32);
            if self.half_edges[index].twin.is_some() {
                continue;
            }
            let Some(to) = self.to(id) else { continue };
            let key = (to.to_bits(), self.half_edges[index].vertex.to_bits());
            if let Some(&opposite) = by_endpoints.get(&key) {
                if self.half_edges[opposite.index()].twin.is_none() && self.link_twins(id, opposite) {
                    linked += 1;
                }
            }
        }

        log::trace!("Linked {} twin pairs over {} half-edges", linked, self.half_edges.len());
        linked
    }

    /// Drop every half-edge and polygon
    pub fn clear(&mut self) {
        self.half_edges.clear();
        self.polygons.clear();
    }
}
