//! Navigation mesh configuration

use serde::{Deserialize, Serialize};

/// Tuning of a [`NavMesh`](crate::NavMesh)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavMeshConfig {
    /// Distance a point may lie outside a region edge and still count as
    /// inside the region
    pub epsilon_contains_test: f32,

    /// Cells per axis of the region lookup grid
    pub spatial_cells: [u32; 3],

    /// Margin added around the mesh bounds before building the grid
    pub spatial_padding: f32,

    /// Region transitions allowed in a single `clamp_movement` call
    /// (default: region count + 1)
    pub max_clamp_iterations: Option<usize>,

    /// Maximum distance between a point and the plane of its region.
    /// Without it, region lookup ignores height entirely.
    pub height_tolerance: Option<f32>,
}

impl Default for NavMeshConfig {
    fn default() -> Self {
        Self {
            epsilon_contains_test: 1e-3,
            spatial_cells: [10, 1, 10],
            spatial_padding: 0.5,
            max_clamp_iterations: None,
            height_tolerance: None,
        }
    }
}

impl NavMeshConfig {
    /// Configuration for meshes with overlapping floors
    pub fn layered(height_tolerance: f32) -> Self {
        Self {
            spatial_cells: [10, 4, 10],
            height_tolerance: Some(height_tolerance),
            ..Default::default()
        }
    }

    /// Set the containment tolerance
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon_contains_test = epsilon;
        self
    }

    /// Set the grid resolution
    pub fn with_spatial_cells(mut self, cells_x: u32, cells_y: u32, cells_z: u32) -> Self {
        self.spatial_cells = [cells_x, cells_y, cells_z];
        self
    }

    /// Set the grid padding
    pub fn with_spatial_padding(mut self, padding: f32) -> Self {
        self.spatial_padding = padding;
        self
    }

    /// Cap the region transitions of `clamp_movement`
    pub fn with_max_clamp_iterations(mut self, iterations: usize) -> Self {
        self.max_clamp_iterations = Some(iterations);
        self
    }

    /// Require points to lie near the plane of their region
    pub fn with_height_tolerance(mut self, tolerance: f32) -> Self {
        self.height_tolerance = Some(tolerance);
        self
    }
}
