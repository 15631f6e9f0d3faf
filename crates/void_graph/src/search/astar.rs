//! A* search

use super::{best_first, GraphSearch, Heuristic, SearchState};
use crate::graph::Graph;

/// Lowest cost path guided by a heuristic
///
/// The result is optimal only if the heuristic never overestimates the
/// remaining cost. That is up to the caller.
#[derive(Clone, Debug)]
pub struct AStar<'g, H> {
    graph: &'g Graph,
    pub source: usize,
    pub target: usize,
    pub heuristic: H,
    state: SearchState,
}

impl<'g, H: Heuristic> AStar<'g, H> {
    pub fn new(graph: &'g Graph, source: usize, target: usize, heuristic: H) -> Self {
        Self {
            graph,
            source,
            target,
            heuristic,
            state: SearchState::default(),
        }
    }
}

impl<H: Heuristic> GraphSearch for AStar<'_, H> {
    fn search(&mut self) -> bool {
        best_first(self.graph, self.source, self.target, &self.heuristic, &mut self.state)
    }

    fn state(&self) -> &SearchState {
        &self.state
    }

    fn clear(&mut self) {
        self.state = SearchState::default();
    }
}
