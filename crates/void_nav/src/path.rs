//! Paths returned by [`NavMesh::find_path`](crate::NavMesh::find_path)

use serde::{Deserialize, Serialize};
use void_math::Vec3;

/// A walkable route through the navigation mesh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavPath {
    /// Start point, centroids of the crossed regions, end point
    pub waypoints: Vec<Vec3>,
    /// Regions visited, from the start region to the end region
    pub regions: Vec<usize>,
    /// Current waypoint index
    pub current_index: usize,
}

impl NavPath {
    /// Create a path that has not been followed yet
    pub fn new(waypoints: Vec<Vec3>, regions: Vec<usize>) -> Self {
        Self {
            waypoints,
            regions,
            current_index: 0,
        }
    }

    /// Check if path is empty
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Check if every waypoint has been reached
    pub fn is_complete(&self) -> bool {
        self.current_index >= self.waypoints.len()
    }

    /// Get current waypoint
    pub fn current_waypoint(&self) -> Option<Vec3> {
        self.waypoints.get(self.current_index).copied()
    }

    /// Get final destination
    pub fn destination(&self) -> Option<Vec3> {
        self.waypoints.last().copied()
    }

    /// Advance to next waypoint
    pub fn advance(&mut self) {
        if self.current_index < self.waypoints.len() {
            self.current_index += 1;
        }
    }

    /// Length of the path still ahead, measured from the current waypoint
    pub fn remaining_distance(&self) -> f32 {
        self.waypoints
            .get(self.current_index..)
            .map(segments_length)
            .unwrap_or(0.0)
    }

    /// Get total path length
    pub fn total_length(&self) -> f32 {
        segments_length(&self.waypoints)
    }
}

fn segments_length(points: &[Vec3]) -> f32 {
    points.windows(2).map(|pair| pair[0].distance_to(pair[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight() -> NavPath {
        NavPath::new(
            vec![Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0)],
            vec![0, 1],
        )
    }

    #[test]
    fn test_nav_path() {
        let path = straight();
        assert!(!path.is_empty());
        assert!(!path.is_complete());
        assert_eq!(path.total_length(), 10.0);
        assert_eq!(path.destination(), Some(Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_advance_until_complete() {
        let mut path = straight();
        path.advance();
        assert_eq!(path.current_waypoint(), Some(Vec3::new(5.0, 0.0, 0.0)));
        assert_eq!(path.remaining_distance(), 5.0);

        path.advance();
        path.advance();
        path.advance();
        assert!(path.is_complete());
        assert_eq!(path.current_index, 3);
        assert_eq!(path.current_waypoint(), None);
        assert_eq!(path.remaining_distance(), 0.0);
    }

    #[test]
    fn test_empty_path() {
        let path = NavPath::default();
        assert!(path.is_empty());
        assert!(path.is_complete());
        assert_eq!(path.total_length(), 0.0);
        assert!(path.destination().is_none());
    }
}
