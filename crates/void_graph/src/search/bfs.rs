//! Breadth-first search

use super::{GraphSearch, SearchState};
use crate::graph::Graph;
use crate::node::Edge;
use std::collections::{BTreeSet, VecDeque};

/// Path with the fewest edges, ignoring costs
#[derive(Clone, Debug)]
pub struct Bfs<'g> {
    graph: &'g Graph,
    pub source: usize,
    pub target: usize,
    state: SearchState,
}

impl<'g> Bfs<'g> {
    pub fn new(graph: &'g Graph, source: usize, target: usize) -> Self {
        Self {
            graph,
            source,
            target,
            state: SearchState::default(),
        }
    }
}

impl GraphSearch for Bfs<'_> {
    fn search(&mut self) -> bool {
        let state = &mut self.state;
        state.reset(self.source, self.target);
        if !self.graph.has_node(self.source) || !self.graph.has_node(self.target) {
            return false;
        }

        let mut visited = BTreeSet::from([self.source]);
        let mut queue = VecDeque::from([self.source]);

        while let Some(node) = queue.pop_front() {
            state.settle(node);
            if node == self.target {
                state.found = true;
                return true;
            }

            for edge in self.graph.edges_of(node) {
                if visited.insert(edge.to) {
                    state.search_frontier.insert(edge.to, *edge);
                    queue.push_back(edge.to);
                }
            }
        }

        log::debug!("Breadth-first search {} -> {} found no path", self.source, self.target);
        false
    }

    fn state(&self) -> &SearchState {
        &self.state
    }

    fn clear(&mut self) {
        self.state = SearchState::default();
    }
}

impl Bfs<'_> {
    /// Edges through which nodes were discovered, including unsettled ones
    pub fn discovered_edges(&self) -> impl Iterator<Item = &Edge> {
        self.state.search_frontier.values()
    }
}
