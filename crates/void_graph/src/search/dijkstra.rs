//! Dijkstra's shortest path search

use super::{best_first, GraphSearch, SearchState, Zero};
use crate::graph::Graph;

/// Lowest cost path by uniform cost expansion
#[derive(Clone, Debug)]
pub struct Dijkstra<'g> {
    graph: &'g Graph,
    pub source: usize,
    pub target: usize,
    state: SearchState,
}

impl<'g> Dijkstra<'g> {
    pub fn new(graph: &'g Graph, source: usize, target: usize) -> Self {
        Self {
            graph,
            source,
            target,
            state: SearchState::default(),
        }
    }
}

impl GraphSearch for Dijkstra<'_> {
    fn search(&mut self) -> bool {
        best_first(self.graph, self.source, self.target, &Zero, &mut self.state)
    }

    fn state(&self) -> &SearchState {
        &self.state
    }

    fn clear(&mut self) {
        self.state = SearchState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Edge, Node};

    #[test]
    fn test_prefers_cheaper_detour() {
        let mut graph = Graph::directed();
        for i in 0..4 {
            graph.add_node(Node::new(i));
        }
        graph.add_edge(Edge::new(0, 3, 10.0));
        graph.add_edge(Edge::new(0, 1, 1.0));
        graph.add_edge(Edge::new(1, 2, 1.0));
        graph.add_edge(Edge::new(2, 3, 1.0));

        let mut dijkstra = Dijkstra::new(&graph, 0, 3);
        assert!(dijkstra.search());
        assert_eq!(dijkstra.get_path(), vec![0, 1, 2, 3]);
        assert_eq!(dijkstra.path_cost(), Some(3.0));
    }

    #[test]
    fn test_clear_forgets_results() {
        let mut graph = Graph::new();
        graph.add_node(Node::new(0));
        graph.add_node(Node::new(1));
        graph.add_edge(Edge::new(0, 1, 1.0));

        let mut dijkstra = Dijkstra::new(&graph, 0, 1);
        dijkstra.search();
        assert!(dijkstra.found());
        dijkstra.clear();
        assert!(!dijkstra.found());
        assert!(dijkstra.get_path().is_empty());
        assert!(dijkstra.get_search_tree().is_empty());
    }
}
