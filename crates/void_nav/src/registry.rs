//! Loading of any navigation entity from tagged JSON

use crate::navmesh::NavMesh;
use crate::partitioning::CellSpacePartitioning;
use serde_json::Value;
use void_core::{Id, JsonEntity, Result, TypeRegistry};
use void_graph::Graph;

/// Every entity the navigation crates can load
#[derive(Debug, Clone)]
pub enum NavEntity {
    Graph(Graph),
    /// Grid with entries still stored as ids
    CellSpacePartitioning(CellSpacePartitioning<Id>),
    NavMesh(NavMesh),
}

impl From<Graph> for NavEntity {
    fn from(graph: Graph) -> Self {
        NavEntity::Graph(graph)
    }
}

impl From<CellSpacePartitioning<Id>> for NavEntity {
    fn from(partition: CellSpacePartitioning<Id>) -> Self {
        NavEntity::CellSpacePartitioning(partition)
    }
}

impl From<NavMesh> for NavEntity {
    fn from(mesh: NavMesh) -> Self {
        NavEntity::NavMesh(mesh)
    }
}

impl NavEntity {
    /// Registry with a constructor for every variant
    pub fn registry() -> TypeRegistry<NavEntity> {
        let mut registry = TypeRegistry::new();
        registry
            .register_entity::<Graph>()
            .register_entity::<CellSpacePartitioning<Id>>()
            .register_entity::<NavMesh>();
        registry
    }

    /// Load whichever entity the `type` tag names
    pub fn from_json(json: &Value) -> Result<Self> {
        Self::registry().deserialize(json)
    }

    /// Tag of the wrapped entity
    pub fn type_name(&self) -> &'static str {
        match self {
            NavEntity::Graph(_) => Graph::TYPE_NAME,
            NavEntity::CellSpacePartitioning(_) => CellSpacePartitioning::<Id>::TYPE_NAME,
            NavEntity::NavMesh(_) => NavMesh::TYPE_NAME,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            NavEntity::Graph(graph) => graph.to_json(),
            NavEntity::CellSpacePartitioning(partition) => partition.to_json(),
            NavEntity::NavMesh(mesh) => mesh.to_json(),
        }
    }
}
