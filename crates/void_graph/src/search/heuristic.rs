//! Cost-to-target estimates for A*

use std::collections::{BTreeMap, HashMap};
use void_math::Vec3;

/// Estimate of the remaining cost from `from` to `to`
pub trait Heuristic {
    fn estimate(&self, from: usize, to: usize) -> f32;
}

/// Always zero, which turns A* into Dijkstra
#[derive(Clone, Copy, Debug, Default)]
pub struct Zero;

impl Heuristic for Zero {
    #[inline]
    fn estimate(&self, _from: usize, _to: usize) -> f32 {
        0.0
    }
}

impl<F> Heuristic for F
where
    F: Fn(usize, usize) -> f32,
{
    #[inline]
    fn estimate(&self, from: usize, to: usize) -> f32 {
        self(from, to)
    }
}

/// Lookup of a world position per node index
pub trait NodePositions {
    fn position(&self, index: usize) -> Option<Vec3>;
}

impl NodePositions for [Vec3] {
    fn position(&self, index: usize) -> Option<Vec3> {
        self.get(index).copied()
    }
}

impl NodePositions for Vec<Vec3> {
    fn position(&self, index: usize) -> Option<Vec3> {
        self.get(index).copied()
    }
}

impl NodePositions for BTreeMap<usize, Vec3> {
    fn position(&self, index: usize) -> Option<Vec3> {
        self.get(&index).copied()
    }
}

impl NodePositions for HashMap<usize, Vec3> {
    fn position(&self, index: usize) -> Option<Vec3> {
        self.get(&index).copied()
    }
}

/// Applies `metric` to both positions, or estimates zero when one is unknown
fn between<P: NodePositions + ?Sized>(positions: &P, from: usize, to: usize, metric: fn(Vec3, Vec3) -> f32) -> f32 {
    match (positions.position(from), positions.position(to)) {
        (Some(a), Some(b)) => metric(a, b),
        _ => 0.0,
    }
}

/// Straight line distance between node positions
#[derive(Clone, Copy, Debug)]
pub struct Euclidean<'a, P: ?Sized>(pub &'a P);

impl<P: NodePositions + ?Sized> Heuristic for Euclidean<'_, P> {
    fn estimate(&self, from: usize, to: usize) -> f32 {
        between(self.0, from, to, Vec3::distance_to)
    }
}

/// Squared straight line distance
///
/// Cheaper than [`Euclidean`] but overestimates once distances exceed one,
/// so paths are not guaranteed to be optimal.
#[derive(Clone, Copy, Debug)]
pub struct EuclideanSquared<'a, P: ?Sized>(pub &'a P);

impl<P: NodePositions + ?Sized> Heuristic for EuclideanSquared<'_, P> {
    fn estimate(&self, from: usize, to: usize) -> f32 {
        between(self.0, from, to, Vec3::squared_distance_to)
    }
}

/// Sum of per-axis distances; admissible on grids without diagonal moves
#[derive(Clone, Copy, Debug)]
pub struct Manhattan<'a, P: ?Sized>(pub &'a P);

impl<P: NodePositions + ?Sized> Heuristic for Manhattan<'_, P> {
    fn estimate(&self, from: usize, to: usize) -> f32 {
        between(self.0, from, to, Vec3::manhattan_distance_to)
    }
}
