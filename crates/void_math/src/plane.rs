//! Infinite planes and line segments

use crate::vector::Vec3;

/// Plane in 3D space (normal · p + distance = 0)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane {
    /// Plane normal (unit vector)
    pub normal: Vec3,
    /// Signed offset along the normal
    pub distance: f32,
}

impl Plane {
    /// Create a new plane from normal and distance
    ///
    /// The normal will be normalized automatically.
    #[inline]
    pub fn new(normal: Vec3, distance: f32) -> Self {
        let len = normal.length();
        if len > 1e-10 {
            Self {
                normal: normal / len,
                distance: distance / len,
            }
        } else {
            Self::default()
        }
    }

    /// Create a plane from a point on the plane and its normal
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            distance: -normal.dot(point),
        }
    }

    /// Create a plane from three points (counter-clockwise winding)
    ///
    /// The normal faces the side from which the points appear counter-clockwise.
    pub fn from_points(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        let normal = (p1 - p0).cross(p2 - p0).normalize();
        Self {
            normal,
            distance: -normal.dot(p0),
        }
    }

    /// Get the signed distance from a point to the plane
    ///
    /// Positive = in front (same side as normal)
    /// Negative = behind (opposite side of normal)
    /// Zero = on the plane
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// Get the closest point on the plane to a given point
    pub fn project_point(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.distance_to_point(point)
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            normal: Vec3::Y,
            distance: 0.0,
        }
    }
}

/// Finite segment between two points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    pub start: Vec3,
    pub end: Vec3,
}

impl LineSegment {
    #[inline]
    pub const fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn delta(&self) -> Vec3 {
        self.end - self.start
    }

    /// Point at parameter `t` (0 = start, 1 = end)
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.start.lerp(self.end, t)
    }

    /// Parameter of the point on the segment closest to `point`
    ///
    /// Clamped to `[0, 1]` unless `clamp_to_line` is false. A degenerate
    /// segment always yields 0.
    pub fn closest_point_to_point_parameter(&self, point: Vec3, clamp_to_line: bool) -> f32 {
        let delta = self.delta();
        let len_sq = delta.length_squared();
        if len_sq <= f32::EPSILON {
            return 0.0;
        }
        let t = (point - self.start).dot(delta) / len_sq;
        if clamp_to_line { t.clamp(0.0, 1.0) } else { t }
    }

    /// Point on the segment closest to `point`
    pub fn closest_point_to_point(&self, point: Vec3) -> Vec3 {
        self.at(self.closest_point_to_point_parameter(point, true))
    }
}
