//! Depth-first search

use super::{GraphSearch, SearchState};
use crate::graph::Graph;
use std::collections::BTreeSet;

/// Any path, found by exploring one branch at a time
#[derive(Clone, Debug)]
pub struct Dfs<'g> {
    graph: &'g Graph,
    pub source: usize,
    pub target: usize,
    state: SearchState,
}

impl<'g> Dfs<'g> {
    pub fn new(graph: &'g Graph, source: usize, target: usize) -> Self {
        Self {
            graph,
            source,
            target,
            state: SearchState::default(),
        }
    }
}

impl GraphSearch for Dfs<'_> {
    fn search(&mut self) -> bool {
        let state = &mut self.state;
        state.reset(self.source, self.target);
        if !self.graph.has_node(self.source) || !self.graph.has_node(self.target) {
            return false;
        }

        let mut visited = BTreeSet::new();
        // Node plus the edge it was pushed through
        let mut stack = vec![(self.source, None)];

        while let Some((node, via)) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            if let Some(edge) = via {
                state.shortest_path_tree.insert(node, edge);
            }
            if node == self.target {
                state.found = true;
                return true;
            }

            for edge in self.graph.edges_of(node) {
                if !visited.contains(&edge.to) {
                    stack.push((edge.to, Some(*edge)));
                }
            }
        }

        log::debug!("Depth-first search {} -> {} found no path", self.source, self.target);
        false
    }

    fn state(&self) -> &SearchState {
        &self.state
    }

    fn clear(&mut self) {
        self.state = SearchState::default();
    }
}
