//! Node and Edge - the vertices and weighted links of a [`Graph`](crate::Graph)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use void_core::type_registry::{decode, tagged};
use void_core::{JsonEntity, Result};

/// A graph vertex, identified by a caller chosen index
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Unique index within the owning graph
    pub index: usize,
}

impl Node {
    /// Create a new node
    pub const fn new(index: usize) -> Self {
        Self { index }
    }
}

impl JsonEntity for Node {
    const TYPE_NAME: &'static str = "Node";

    fn to_json(&self) -> Value {
        tagged(Self::TYPE_NAME, self)
    }

    fn from_json(json: &Value) -> Result<Self> {
        decode(json, Self::TYPE_NAME)
    }
}

/// A directed, weighted link between two nodes
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Index of the source node
    pub from: usize,
    /// Index of the target node
    pub to: usize,
    /// Traversal cost, expected to be non-negative
    #[serde(default)]
    pub cost: f32,
}

impl Edge {
    /// Create a new edge
    pub const fn new(from: usize, to: usize, cost: f32) -> Self {
        Self { from, to, cost }
    }

    /// Same edge running the other way
    pub const fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            cost: self.cost,
        }
    }

    /// Check if this edge links `from` to `to`
    #[inline]
    pub fn connects(&self, from: usize, to: usize) -> bool {
        self.from == from && self.to == to
    }
}

impl JsonEntity for Edge {
    const TYPE_NAME: &'static str = "Edge";

    fn to_json(&self) -> Value {
        tagged(Self::TYPE_NAME, self)
    }

    fn from_json(json: &Value) -> Result<Self> {
        decode(json, Self::TYPE_NAME)
    }
}
