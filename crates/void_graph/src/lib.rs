//! # void_graph - Weighted Graphs and Path Search
//!
//! A sparse graph of indexed nodes and weighted edges, plus the searches that
//! run on it:
//! - Dijkstra and A* for lowest cost paths
//! - Breadth- and depth-first search for plain reachability
//!
//! ## Example
//!
//! ```
//! use void_graph::prelude::*;
//!
//! let mut graph = Graph::new();
//! for i in 0..3 {
//!     graph.add_node(Node::new(i));
//! }
//! graph.add_edge(Edge::new(0, 1, 1.0));
//! graph.add_edge(Edge::new(1, 2, 1.0));
//!
//! let mut search = Dijkstra::new(&graph, 0, 2);
//! assert!(search.search());
//! assert_eq!(search.get_path(), vec![0, 1, 2]);
//! ```

pub mod graph;
pub mod node;
pub mod search;

pub use graph::Graph;
pub use node::{Edge, Node};
pub use search::{
    AStar, Bfs, Dfs, Dijkstra, Euclidean, EuclideanSquared, GraphSearch, Heuristic, Manhattan,
    NodePositions, SearchState, Zero,
};

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::graph::Graph;
    pub use crate::node::{Edge, Node};
    pub use crate::search::{AStar, Bfs, Dfs, Dijkstra, Euclidean, GraphSearch, Heuristic, Zero};
    pub use void_core::JsonEntity;
}
