//! Uniform grid spatial index
//!
//! The bounding box is cut into `cells_x × cells_y × cells_z` equal cells,
//! stored flat with `x` varying slowest:
//!
//! ```text
//! index = ix * cells_y * cells_z + iy * cells_z + iz
//! ```
//!
//! Entries are plain values (usually indices or ids) chosen by the caller,
//! who also decides when to move them between cells.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use void_core::type_registry::{decode, expect_type, tagged};
use void_core::{Error, Id, Identified, JsonEntity};
use void_math::{HalfEdgeMesh, PolygonId, Sphere, Vec3, AABB};

/// One bucket of the grid
#[derive(Clone, Debug, PartialEq)]
pub struct Cell<E> {
    /// Region of space covered by the cell
    pub aabb: AABB,
    /// Occupants, in insertion order
    pub entries: Vec<E>,
}

impl<E: PartialEq> Cell<E> {
    pub fn new(aabb: AABB) -> Self {
        Self {
            aabb,
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: E) {
        self.entries.push(entry);
    }

    /// Remove one occurrence of `entry`. Order of the rest is not kept.
    pub fn remove(&mut self, entry: &E) -> bool {
        match self.entries.iter().position(|e| e == entry) {
            Some(index) => {
                self.entries.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop every entry
    pub fn empty(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        self.aabb.intersects_sphere(sphere)
    }

    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.aabb.intersects(aabb)
    }
}

/// Fixed grid of [`Cell`]s over a bounding box
#[derive(Clone, Debug, PartialEq)]
pub struct CellSpacePartitioning<E> {
    bounds: AABB,
    cells_x: usize,
    cells_y: usize,
    cells_z: usize,
    cells: Vec<Cell<E>>,
}

impl<E: Clone + PartialEq> CellSpacePartitioning<E> {
    /// Grid of the given size centred at the origin
    pub fn new(width: f32, height: f32, depth: f32, cells_x: usize, cells_y: usize, cells_z: usize) -> Self {
        let half = Vec3::new(width, height, depth) * 0.5;
        Self::from_aabb(AABB::new(-half, half), cells_x, cells_y, cells_z)
    }

    /// Grid covering `bounds`. Cell counts below one are raised to one.
    pub fn from_aabb(bounds: AABB, cells_x: usize, cells_y: usize, cells_z: usize) -> Self {
        let (cells_x, cells_y, cells_z) = (cells_x.max(1), cells_y.max(1), cells_z.max(1));
        let size = bounds.size();
        let cell_size = Vec3::new(
            size.x / cells_x as f32,
            size.y / cells_y as f32,
            size.z / cells_z as f32,
        );

        let mut cells = Vec::with_capacity(cells_x * cells_y * cells_z);
        for i in 0..cells_x {
            for j in 0..cells_y {
                for k in 0..cells_z {
                    let min = bounds.min
                        + Vec3::new(
                            i as f32 * cell_size.x,
                            j as f32 * cell_size.y,
                            k as f32 * cell_size.z,
                        );
                    cells.push(Cell::new(AABB::new(min, min + cell_size)));
                }
            }
        }

        Self {
            bounds,
            cells_x,
            cells_y,
            cells_z,
            cells,
        }
    }

    pub fn bounds(&self) -> AABB {
        self.bounds
    }

    /// Cell counts along x, y and z
    pub fn resolution(&self) -> [usize; 3] {
        [self.cells_x, self.cells_y, self.cells_z]
    }

    pub fn cells(&self) -> &[Cell<E>] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell<E>> {
        self.cells.get(index)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Add an entry to a cell. Returns false for an out of range index.
    pub fn add_entity_to_partition(&mut self, entry: E, index: usize) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) => {
                cell.add(entry);
                true
            }
            None => false,
        }
    }

    /// Remove an entry from a cell
    pub fn remove_entity_from_partition(&mut self, entry: &E, index: usize) -> bool {
        self.cells.get_mut(index).is_some_and(|cell| cell.remove(entry))
    }

    /// Flat index of the cell containing `position`
    ///
    /// Positions outside the bounds map to the nearest boundary cell.
    pub fn get_index_for_position(&self, position: Vec3) -> usize {
        let p = self.bounds.clamp_point(position);
        let size = self.bounds.size();

        let ix = axis_index(p.x - self.bounds.min.x, size.x, self.cells_x);
        let iy = axis_index(p.y - self.bounds.min.y, size.y, self.cells_y);
        let iz = axis_index(p.z - self.bounds.min.z, size.z, self.cells_z);

        ix * self.cells_y * self.cells_z + iy * self.cells_z + iz
    }

    /// Move `entry` to the cell of `position`
    ///
    /// `old_index` is the cell the entry was last placed in, if any. Nothing
    /// changes when the cell is the same. Returns the new cell index.
    pub fn update_entity(&mut self, entry: E, position: Vec3, old_index: Option<usize>) -> usize {
        let index = self.get_index_for_position(position);
        if old_index != Some(index) {
            if let Some(old_index) = old_index {
                self.remove_entity_from_partition(&entry, old_index);
            }
            self.add_entity_to_partition(entry, index);
        }
        index
    }

    /// Append the entries of every cell touching the sphere to `result`
    ///
    /// Works at cell granularity, so entries outside the sphere may be
    /// included. `result` is not cleared.
    pub fn query(&self, position: Vec3, radius: f32, result: &mut Vec<E>) {
        let sphere = Sphere::new(position, radius);
        for cell in &self.cells {
            if !cell.is_empty() && cell.intersects_sphere(&sphere) {
                result.extend(cell.entries.iter().cloned());
            }
        }
    }

    /// Cell indices of the column of cells above and below `position`,
    /// bottom first
    pub fn get_column_indices(&self, position: Vec3) -> impl Iterator<Item = usize> {
        let p = self.bounds.clamp_point(position);
        let size = self.bounds.size();
        let ix = axis_index(p.x - self.bounds.min.x, size.x, self.cells_x);
        let iz = axis_index(p.z - self.bounds.min.z, size.z, self.cells_z);

        let (cells_y, cells_z) = (self.cells_y, self.cells_z);
        (0..cells_y).map(move |iy| ix * cells_y * cells_z + iy * cells_z + iz)
    }

    /// Add `entry` to every cell touched by `aabb`.
    /// Returns the number of cells it was added to.
    pub fn add_aabb(&mut self, entry: E, aabb: &AABB) -> usize {
        if aabb.is_empty() {
            return 0;
        }

        let mut added = 0;
        for cell in &mut self.cells {
            if cell.intersects_aabb(aabb) {
                cell.add(entry.clone());
                added += 1;
            }
        }
        added
    }

    /// Add `entry` to every cell touched by the bounds of a polygon
    pub fn add_polygon(&mut self, entry: E, mesh: &HalfEdgeMesh, polygon: PolygonId) -> usize {
        self.add_aabb(entry, &mesh.polygon_aabb(polygon))
    }

    /// Remove every entry, keeping the cells
    pub fn make_empty(&mut self) {
        for cell in &mut self.cells {
            cell.empty();
        }
    }
}

fn axis_index(offset: f32, size: f32, cells: usize) -> usize {
    if size <= 0.0 {
        return 0;
    }
    let index = (cells as f32 * offset / size).floor() as usize;
    index.min(cells - 1)
}

#[derive(Serialize, Deserialize)]
struct CellJson {
    aabb: AABB,
    entries: Vec<Id>,
}

#[derive(Serialize, Deserialize)]
struct PartitionJson {
    aabb: AABB,
    cells_x: usize,
    cells_y: usize,
    cells_z: usize,
}

const CELL_TYPE: &str = "Cell";

impl<E: Clone + PartialEq + Identified> CellSpacePartitioning<E> {
    /// Serialize with every entry replaced by its id
    pub fn to_json(&self) -> Value {
        let cells: Vec<Value> = self
            .cells
            .iter()
            .map(|cell| {
                let payload = CellJson {
                    aabb: cell.aabb,
                    entries: cell.entries.iter().map(Identified::id).collect(),
                };
                tagged(CELL_TYPE, &payload)
            })
            .collect();

        json!({
            "type": <CellSpacePartitioning<Id> as JsonEntity>::TYPE_NAME,
            "aabb": self.bounds,
            "cells_x": self.cells_x,
            "cells_y": self.cells_y,
            "cells_z": self.cells_z,
            "cells": cells,
        })
    }
}

impl JsonEntity for CellSpacePartitioning<Id> {
    const TYPE_NAME: &'static str = "CellSpacePartitioning";

    fn to_json(&self) -> Value {
        CellSpacePartitioning::<Id>::to_json(self)
    }

    /// Load a grid whose entries are still ids; see
    /// [`resolve_references`](CellSpacePartitioning::resolve_references)
    fn from_json(json: &Value) -> void_core::Result<Self> {
        expect_type(json, Self::TYPE_NAME)?;
        let layout: PartitionJson = serde_json::from_value(json.clone())?;
        let mut partition = Self::from_aabb(layout.aabb, layout.cells_x, layout.cells_y, layout.cells_z);

        let cells = json.get("cells").and_then(Value::as_array).ok_or(Error::MissingField {
            type_name: Self::TYPE_NAME,
            field: "cells",
        })?;
        if cells.len() != partition.cell_count() {
            log::warn!(
                "CellSpacePartitioning JSON lists {} cells, layout needs {}",
                cells.len(),
                partition.cell_count()
            );
            return Err(Error::MissingField {
                type_name: Self::TYPE_NAME,
                field: "cells",
            });
        }

        for (cell, json) in partition.cells.iter_mut().zip(cells) {
            let loaded: CellJson = decode(json, CELL_TYPE)?;
            cell.entries = loaded.entries;
        }
        Ok(partition)
    }
}

impl CellSpacePartitioning<Id> {
    /// Swap every id for the matching entity. Ids missing from `entities`
    /// are dropped with a warning.
    pub fn resolve_references<E>(&self, entities: &HashMap<Id, E>) -> CellSpacePartitioning<E>
    where
        E: Clone + PartialEq,
    {
        let cells = self
            .cells
            .iter()
            .map(|cell| Cell {
                aabb: cell.aabb,
                entries: cell
                    .entries
                    .iter()
                    .filter_map(|id| {
                        let entity = entities.get(id).cloned();
                        if entity.is_none() {
                            log::warn!("Dropping unresolved partition entry {}", id);
                        }
                        entity
                    })
                    .collect(),
            })
            .collect();

        self.with_cells(cells)
    }

    /// Swap every id for the matching entity, failing on the first id
    /// missing from `entities`
    pub fn try_resolve_references<E>(&self, entities: &HashMap<Id, E>) -> void_core::Result<CellSpacePartitioning<E>>
    where
        E: Clone + PartialEq,
    {
        let mut cells = Vec::with_capacity(self.cells.len());
        for cell in &self.cells {
            let entries = cell
                .entries
                .iter()
                .map(|id| entities.get(id).cloned().ok_or(Error::UnresolvedReference(*id)))
                .collect::<void_core::Result<Vec<E>>>()?;
            cells.push(Cell {
                aabb: cell.aabb,
                entries,
            });
        }
        Ok(self.with_cells(cells))
    }

    fn with_cells<E>(&self, cells: Vec<Cell<E>>) -> CellSpacePartitioning<E> {
        CellSpacePartitioning {
            bounds: self.bounds,
            cells_x: self.cells_x,
            cells_y: self.cells_y,
            cells_z: self.cells_z,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_layout() {
        let partition: CellSpacePartitioning<usize> = CellSpacePartitioning::new(10.0, 10.0, 10.0, 5, 5, 5);
        assert_eq!(partition.cell_count(), 125);

        let first = partition.cell(0).unwrap();
        assert_eq!(first.aabb.min, Vec3::splat(-5.0));
        assert_eq!(first.aabb.max, Vec3::splat(-3.0));

        // z varies fastest
        let next = partition.cell(1).unwrap();
        assert_eq!(next.aabb.min, Vec3::new(-5.0, -5.0, -3.0));
    }

    #[test]
    fn test_index_matches_cell_bounds() {
        let partition: CellSpacePartitioning<usize> = CellSpacePartitioning::new(10.0, 4.0, 6.0, 5, 2, 3);
        let position = Vec3::new(1.5, -1.0, 2.5);
        let index = partition.get_index_for_position(position);
        assert!(partition.cell(index).unwrap().aabb.contains_point(position));
    }

    #[test]
    fn test_cell_remove_swaps() {
        let mut cell = Cell::new(AABB::new(Vec3::ZERO, Vec3::ONE));
        cell.add(1);
        cell.add(2);
        cell.add(3);
        assert!(cell.remove(&1));
        assert_eq!(cell.entries, vec![3, 2]);
        assert!(!cell.remove(&7));
    }

    #[test]
    fn test_out_of_range_partition_index() {
        let mut partition: CellSpacePartitioning<usize> = CellSpacePartitioning::new(2.0, 2.0, 2.0, 1, 1, 1);
        assert!(!partition.add_entity_to_partition(5, 3));
        assert!(!partition.remove_entity_from_partition(&5, 0));
    }

    #[test]
    fn test_flat_bounds_map_to_single_layer() {
        let bounds = AABB::new(Vec3::ZERO, Vec3::new(4.0, 0.0, 4.0));
        let partition: CellSpacePartitioning<usize> = CellSpacePartitioning::from_aabb(bounds, 2, 3, 2);
        assert_eq!(partition.get_index_for_position(Vec3::new(3.0, 0.0, 3.0)), 3 * 2 + 1);
    }

    #[test]
    fn test_column_spans_every_layer() {
        let partition: CellSpacePartitioning<usize> = CellSpacePartitioning::new(10.0, 4.0, 6.0, 5, 4, 3);
        let position = Vec3::new(1.5, 9.0, -2.5);
        let column: Vec<usize> = partition.get_column_indices(position).collect();

        assert_eq!(column.len(), 4);
        assert!(column.contains(&partition.get_index_for_position(position)));
        for index in column {
            let aabb = partition.cell(index).unwrap().aabb;
            assert!(aabb.min.x <= 1.5 && 1.5 <= aabb.max.x);
            assert!(aabb.min.z <= -2.5 && -2.5 <= aabb.max.z);
        }
    }
}
