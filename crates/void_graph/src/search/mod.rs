//! Graph searches
//!
//! Every search borrows the graph it runs on, so the graph cannot change while
//! a searcher holds results for it. Calling `search()` again always starts
//! from a clean state.
//!
//! - [`Dijkstra`] and [`AStar`]: lowest cost paths over non-negative weights
//! - [`Bfs`] and [`Dfs`]: unweighted reachability

mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod heuristic;

pub use astar::AStar;
pub use bfs::Bfs;
pub use dfs::Dfs;
pub use dijkstra::Dijkstra;
pub use heuristic::{Euclidean, EuclideanSquared, Heuristic, Manhattan, NodePositions, Zero};

use crate::graph::Graph;
use crate::node::Edge;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

/// Shared interface of all searches
pub trait GraphSearch {
    /// Run the search. Returns whether the target was reached.
    fn search(&mut self) -> bool;

    /// Results of the last run
    fn state(&self) -> &SearchState;

    /// Forget the results of the last run
    fn clear(&mut self);

    /// Whether the last run reached the target
    fn found(&self) -> bool {
        self.state().found
    }

    /// Node indices from source to target inclusive, empty without a path
    fn get_path(&self) -> Vec<usize> {
        self.state().path()
    }

    /// Parent edge of every node settled by the last run
    fn get_search_tree(&self) -> Vec<Edge> {
        self.state().shortest_path_tree.values().copied().collect()
    }

    /// Summed edge cost along the path, `None` without a path
    fn path_cost(&self) -> Option<f32> {
        self.state().path_cost()
    }
}

/// Bookkeeping of one search run
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    source: usize,
    target: usize,
    found: bool,
    /// Best known cost from the source
    costs: BTreeMap<usize, f32>,
    /// Edge through which each settled node was reached
    shortest_path_tree: BTreeMap<usize, Edge>,
    /// Best known incoming edge of each discovered node
    search_frontier: BTreeMap<usize, Edge>,
}

impl SearchState {
    fn reset(&mut self, source: usize, target: usize) {
        self.source = source;
        self.target = target;
        self.found = false;
        self.costs.clear();
        self.shortest_path_tree.clear();
        self.search_frontier.clear();
    }

    /// Record `node` as settled, keeping the edge it was discovered through
    fn settle(&mut self, node: usize) {
        if let Some(&edge) = self.search_frontier.get(&node) {
            self.shortest_path_tree.insert(node, edge);
        }
    }

    fn path(&self) -> Vec<usize> {
        if !self.found {
            return Vec::new();
        }

        let mut path = vec![self.target];
        let mut current = self.target;
        while current != self.source {
            let Some(edge) = self.shortest_path_tree.get(&current) else {
                log::warn!("Search tree lost the parent of node {}", current);
                return Vec::new();
            };
            current = edge.from;
            path.push(current);
            if path.len() > self.shortest_path_tree.len() + 1 {
                log::warn!("Cycle in search tree at node {}", current);
                return Vec::new();
            }
        }
        path.reverse();
        path
    }

    fn path_cost(&self) -> Option<f32> {
        if !self.found {
            return None;
        }
        let path = self.path();
        let cost = path
            .windows(2)
            .filter_map(|pair| self.shortest_path_tree.get(&pair[1]))
            .map(|edge| edge.cost)
            .sum();
        Some(cost)
    }
}

/// Open list entry: lowest priority first, then first pushed
#[derive(Clone, Copy, Debug)]
struct Candidate {
    priority: f32,
    sequence: u64,
    node: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Best-first expansion shared by Dijkstra and A*
fn best_first<H: Heuristic + ?Sized>(
    graph: &Graph,
    source: usize,
    target: usize,
    heuristic: &H,
    state: &mut SearchState,
) -> bool {
    state.reset(source, target);
    if !graph.has_node(source) || !graph.has_node(target) {
        log::debug!("Search endpoints {} -> {} are not both in the graph", source, target);
        return false;
    }

    let mut open = BinaryHeap::new();
    let mut settled = BTreeSet::new();
    let mut sequence = 0u64;

    state.costs.insert(source, 0.0);
    open.push(Candidate {
        priority: heuristic.estimate(source, target),
        sequence,
        node: source,
    });

    while let Some(Candidate { node, .. }) = open.pop() {
        if !settled.insert(node) {
            continue;
        }
        state.settle(node);

        if node == target {
            state.found = true;
            return true;
        }

        let cost_so_far = state.costs.get(&node).copied().unwrap_or(0.0);
        for edge in graph.edges_of(node) {
            if settled.contains(&edge.to) {
                continue;
            }
            let cost = cost_so_far + edge.cost;
            let improves = state.costs.get(&edge.to).map_or(true, |&known| cost < known);
            if improves {
                state.costs.insert(edge.to, cost);
                state.search_frontier.insert(edge.to, *edge);
                sequence += 1;
                open.push(Candidate {
                    priority: cost + heuristic.estimate(edge.to, target),
                    sequence,
                    node: edge.to,
                });
            }
        }
    }

    log::debug!("Search {} -> {} exhausted after settling {} nodes", source, target, settled.len());
    false
}
