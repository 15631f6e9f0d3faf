//! Graph - weighted nodes and edges with optional direction
//!
//! Nodes are keyed by their index and every node owns the list of edges
//! leaving it. A non-directed graph keeps both directions of every link in
//! sync: adding or removing `a → b` adds or removes `b → a` as well.

use crate::node::{Edge, Node};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use void_core::type_registry::expect_type;
use void_core::{Error, JsonEntity, Result};

/// A sparse weighted graph
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
    /// Edges are one way only
    digraph: bool,
    /// All nodes, keyed by index
    nodes: BTreeMap<usize, Node>,
    /// Outgoing edges, keyed by source index
    edges: BTreeMap<usize, Vec<Edge>>,
}

impl Graph {
    /// Create a new empty non-directed graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty directed graph
    pub fn directed() -> Self {
        Self {
            digraph: true,
            ..Self::default()
        }
    }

    /// Whether edges are one way only
    pub fn is_digraph(&self) -> bool {
        self.digraph
    }

    /// Add a node. Returns false if its index was already present, in which
    /// case the existing edges are kept.
    pub fn add_node(&mut self, node: Node) -> bool {
        let added = self.nodes.insert(node.index, node).is_none();
        self.edges.entry(node.index).or_default();
        added
    }

    /// Remove a node together with every edge leading to or from it
    pub fn remove_node(&mut self, index: usize) -> Option<Node> {
        let node = self.nodes.remove(&index)?;
        self.edges.remove(&index);
        for list in self.edges.values_mut() {
            list.retain(|edge| edge.to != index);
        }
        Some(node)
    }

    /// Add an edge between two existing nodes
    ///
    /// An edge already linking the same ordered pair has its cost replaced.
    /// In a non-directed graph the opposite edge is created or updated to the
    /// same cost. Returns false if either endpoint is missing.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if !self.has_node(edge.from) || !self.has_node(edge.to) {
            log::debug!("Rejecting edge {} -> {}: unknown node", edge.from, edge.to);
            return false;
        }

        self.upsert_edge(edge);
        if !self.digraph && edge.from != edge.to {
            self.upsert_edge(edge.reversed());
        }
        true
    }

    fn upsert_edge(&mut self, edge: Edge) {
        let list = self.edges.entry(edge.from).or_default();
        match list.iter_mut().find(|e| e.to == edge.to) {
            Some(existing) => existing.cost = edge.cost,
            None => list.push(edge),
        }
    }

    /// Remove the edge `from → to`, and `to → from` in a non-directed graph
    pub fn remove_edge(&mut self, from: usize, to: usize) -> Option<Edge> {
        let removed = Self::take_edge(&mut self.edges, from, to)?;
        if !self.digraph {
            Self::take_edge(&mut self.edges, to, from);
        }
        Some(removed)
    }

    fn take_edge(edges: &mut BTreeMap<usize, Vec<Edge>>, from: usize, to: usize) -> Option<Edge> {
        let list = edges.get_mut(&from)?;
        let position = list.iter().position(|e| e.to == to)?;
        Some(list.remove(position))
    }

    /// Check if a node exists
    pub fn has_node(&self, index: usize) -> bool {
        self.nodes.contains_key(&index)
    }

    /// Check if the edge `from → to` exists
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.get_edge(from, to).is_some()
    }

    /// Get a node
    pub fn get_node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(&index)
    }

    /// Get the edge `from → to`
    pub fn get_edge(&self, from: usize, to: usize) -> Option<&Edge> {
        self.edges.get(&from)?.iter().find(|e| e.to == to)
    }

    /// Fill `result` with every node in index order (cleared first)
    pub fn get_nodes(&self, result: &mut Vec<Node>) {
        result.clear();
        result.extend(self.nodes.values().copied());
    }

    /// Fill `result` with the edges leaving `index` (cleared first)
    pub fn get_edges_of_node(&self, index: usize, result: &mut Vec<Edge>) {
        result.clear();
        result.extend_from_slice(self.edges_of(index));
    }

    /// Edges leaving `index`, empty for an unknown node
    pub fn edges_of(&self, index: usize) -> &[Edge] {
        self.edges.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get node count
    pub fn get_node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored edges; a non-directed link counts twice
    pub fn get_edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all edges, grouped by source node
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values().flatten()
    }

    /// Remove every node and edge
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}

impl JsonEntity for Graph {
    const TYPE_NAME: &'static str = "Graph";

    fn to_json(&self) -> Value {
        let nodes: Vec<Value> = self.nodes().map(JsonEntity::to_json).collect();
        let edges: Vec<Value> = self.edges().map(JsonEntity::to_json).collect();
        json!({
            "type": Self::TYPE_NAME,
            "digraph": self.digraph,
            "nodes": nodes,
            "edges": edges,
        })
    }

    /// Rebuild a graph written by [`to_json`](JsonEntity::to_json)
    ///
    /// Edges are restored exactly as listed, without creating mirrors. An edge
    /// naming a missing node is skipped with a warning.
    fn from_json(json: &Value) -> Result<Self> {
        expect_type(json, Self::TYPE_NAME)?;
        let missing = |field| Error::MissingField {
            type_name: Self::TYPE_NAME,
            field,
        };

        let mut graph = Self {
            digraph: json.get("digraph").and_then(Value::as_bool).ok_or_else(|| missing("digraph"))?,
            ..Self::default()
        };

        let nodes = json.get("nodes").and_then(Value::as_array).ok_or_else(|| missing("nodes"))?;
        for node in nodes {
            graph.add_node(Node::from_json(node)?);
        }

        let edges = json.get("edges").and_then(Value::as_array).ok_or_else(|| missing("edges"))?;
        for edge in edges {
            let edge = Edge::from_json(edge)?;
            if graph.has_node(edge.from) && graph.has_node(edge.to) {
                graph.upsert_edge(edge);
            } else {
                log::warn!("Skipping edge {} -> {} referencing a missing node", edge.from, edge.to);
            }
        }

        log::debug!(
            "Loaded graph with {} nodes and {} edges",
            graph.get_node_count(),
            graph.get_edge_count()
        );
        Ok(graph)
    }
}
