//! Integration tests for void_nav spatial partitioning

use std::collections::HashMap;
use void_math::HalfEdgeMesh;
use void_nav::prelude::*;

fn grid() -> CellSpacePartitioning<usize> {
    CellSpacePartitioning::new(10.0, 10.0, 10.0, 5, 5, 5)
}

/// Deterministic spread of points over and beyond the grid
fn scattered(count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let f = i as f32;
            Vec3::new((f * 2.3).sin() * 6.0, (f * 1.7).cos() * 5.5, (f * 0.9).sin() * 4.0)
        })
        .collect()
}

#[test]
fn test_index_is_clamped() {
    let partition = grid();
    assert_eq!(partition.get_index_for_position(Vec3::splat(-6.0)), 0);
    assert_eq!(partition.get_index_for_position(Vec3::splat(6.0)), 124);
    assert_eq!(partition.get_index_for_position(Vec3::splat(5.0)), 124);
    assert_eq!(partition.get_index_for_position(Vec3::ZERO), 2 * 25 + 2 * 5 + 2);
}

#[test]
fn test_update_entity_moves_between_cells() {
    let mut partition = grid();

    let first = partition.update_entity(7, Vec3::new(-4.0, -4.0, -4.0), None);
    assert_eq!(first, 0);
    assert_eq!(partition.cell(0).unwrap().entries, vec![7]);

    let second = partition.update_entity(7, Vec3::new(4.0, 4.0, 4.0), Some(first));
    assert_eq!(second, 124);
    assert!(partition.cell(0).unwrap().is_empty());
    assert_eq!(partition.cell(124).unwrap().entries, vec![7]);
}

#[test]
fn test_update_entity_is_idempotent() {
    let mut partition = grid();
    let position = Vec3::new(1.0, 2.0, 3.0);

    let index = partition.update_entity(3, position, None);
    for _ in 0..3 {
        assert_eq!(partition.update_entity(3, position, Some(index)), index);
    }
    let total: usize = partition.cells().iter().map(|cell| cell.entries.len()).sum();
    assert_eq!(total, 1);
}

#[test]
fn test_query_never_under_includes() {
    let mut partition = grid();
    let positions = scattered(200);
    for (entity, &position) in positions.iter().enumerate() {
        partition.update_entity(entity, position, None);
    }

    for &(center, radius) in &[
        (Vec3::ZERO, 1.0),
        (Vec3::new(3.0, -2.0, 1.0), 2.5),
        (Vec3::new(-4.5, 4.5, 0.0), 0.1),
        (Vec3::new(9.0, 0.0, 0.0), 4.5),
    ] {
        let mut result = Vec::new();
        partition.query(center, radius, &mut result);

        for (entity, &position) in positions.iter().enumerate() {
            let inside_grid = partition.bounds().contains_point(position);
            if inside_grid && position.distance_to(center) <= radius {
                assert!(result.contains(&entity), "entity {} missing near {:?}", entity, center);
            }
        }
    }
}

#[test]
fn test_query_appends() {
    let mut partition = grid();
    partition.update_entity(1, Vec3::ZERO, None);

    let mut result = vec![42];
    partition.query(Vec3::ZERO, 0.5, &mut result);
    assert_eq!(result, vec![42, 1]);
}

#[test]
fn test_make_empty_keeps_cells() {
    let mut partition = grid();
    partition.update_entity(1, Vec3::ZERO, None);
    partition.make_empty();

    assert_eq!(partition.cell_count(), 125);
    assert!(partition.cells().iter().all(Cell::is_empty));
}

#[test]
fn test_add_polygon_covers_its_bounds() {
    let mut mesh = HalfEdgeMesh::new();
    let polygon = mesh
        .add_polygon(&[
            Vec3::new(-4.0, 0.0, -4.0),
            Vec3::new(-4.0, 0.0, -1.5),
            Vec3::new(-1.5, 0.0, -1.5),
            Vec3::new(-1.5, 0.0, -4.0),
        ])
        .unwrap();

    let mut partition = grid();
    let added = partition.add_polygon(7, &mesh, polygon);

    // x and z span cells 0 and 1, y sits inside cell 2
    assert_eq!(added, 4);
    assert!(partition.cell(partition.get_index_for_position(Vec3::new(-3.5, 0.0, -3.5))).unwrap().entries.contains(&7));
    assert!(partition.cell(partition.get_index_for_position(Vec3::new(3.5, 0.0, 3.5))).unwrap().is_empty());
}

#[test]
fn test_navmesh_regions_registered_in_grid() {
    let contour = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 4.0),
        Vec3::new(4.0, 0.0, 4.0),
        Vec3::new(4.0, 0.0, 0.0),
    ];
    let config = NavMeshConfig::default().with_spatial_cells(4, 1, 4);
    let mesh = NavMesh::from_polygons(&[contour], config).unwrap();

    let index = mesh.spatial_index();
    let cells_with_region = index.cells().iter().filter(|cell| cell.entries.contains(&0)).count();
    assert_eq!(cells_with_region, index.cell_count());
}

#[test]
fn test_json_round_trip_with_references() {
    let mut partition: CellSpacePartitioning<Id> = CellSpacePartitioning::new(4.0, 4.0, 4.0, 2, 2, 2);
    let alpha = Id::from_name("alpha");
    let beta = Id::from_name("beta");
    partition.update_entity(alpha, Vec3::splat(-1.0), None);
    partition.update_entity(beta, Vec3::splat(1.0), None);

    let json = partition.to_json();
    assert_eq!(json["type"], "CellSpacePartitioning");
    assert_eq!(json["cells"].as_array().unwrap().len(), 8);

    let loaded = <CellSpacePartitioning<Id> as JsonEntity>::from_json(&json).unwrap();
    assert_eq!(loaded, partition);

    let entities = HashMap::from([(alpha, "alpha")]);
    let resolved = loaded.resolve_references(&entities);
    assert_eq!(resolved.cell(0).unwrap().entries, vec!["alpha"]);
    assert!(resolved.cell(7).unwrap().is_empty());
}

#[test]
fn test_strict_resolution_reports_missing_id() {
    let mut partition: CellSpacePartitioning<Id> = CellSpacePartitioning::new(4.0, 4.0, 4.0, 2, 2, 2);
    let alpha = Id::from_name("alpha");
    let beta = Id::from_name("beta");
    partition.update_entity(alpha, Vec3::splat(-1.0), None);
    partition.update_entity(beta, Vec3::splat(1.0), None);

    let partial = HashMap::from([(alpha, 1u32)]);
    assert!(matches!(
        partition.try_resolve_references(&partial),
        Err(void_core::Error::UnresolvedReference(id)) if id == beta
    ));

    let complete = HashMap::from([(alpha, 1u32), (beta, 2u32)]);
    let resolved = partition.try_resolve_references(&complete).unwrap();
    assert_eq!(resolved.cell(0).unwrap().entries, vec![1]);
    assert_eq!(resolved.cell(7).unwrap().entries, vec![2]);
}

#[test]
fn test_registry_dispatch() {
    let registry = NavEntity::registry();
    assert!(registry.contains("Graph"));
    assert!(registry.contains("CellSpacePartitioning"));
    assert!(registry.contains("NavMesh"));

    let partition: CellSpacePartitioning<Id> = CellSpacePartitioning::new(2.0, 2.0, 2.0, 1, 1, 1);
    let entity = NavEntity::from_json(&partition.to_json()).unwrap();
    assert_eq!(entity.type_name(), "CellSpacePartitioning");

    let unknown = serde_json::json!({ "type": "Steering" });
    assert!(matches!(
        NavEntity::from_json(&unknown),
        Err(void_core::Error::UnknownType(tag)) if tag == "Steering"
    ));
}
