//! Bounding volumes for spatial queries

use crate::vector::Vec3;

/// Axis-Aligned Bounding Box
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    /// Create an empty (inverted) AABB
    pub const EMPTY: Self = Self {
        min: Vec3::new(f32::MAX, f32::MAX, f32::MAX),
        max: Vec3::new(f32::MIN, f32::MIN, f32::MIN),
    };

    /// Create from min and max points
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create from center and half-extents
    #[inline]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Create from a set of points
    pub fn from_points(points: &[Vec3]) -> Self {
        points
            .iter()
            .fold(Self::EMPTY, |aabb, &point| aabb.expand_to_include(point))
    }

    /// Get the center point
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Get the size (full extents)
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if the AABB is empty (inverted)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Expand to include a point
    pub fn expand_to_include(self, point: Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Union of two AABBs
    #[inline]
    pub fn union(&self, other: &AABB) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Expand AABB by a uniform amount in all directions
    #[inline]
    pub fn expand(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(amount),
            max: self.max + Vec3::splat(amount),
        }
    }

    /// Check if a point is inside (boundary inclusive)
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if two AABBs intersect (touching counts)
    #[inline]
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Get the closest point on the AABB to a given point
    #[inline]
    pub fn clamp_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// Get the squared distance to a point
    pub fn distance_squared_to_point(&self, point: Vec3) -> f32 {
        (point - self.clamp_point(point)).length_squared()
    }

    /// Check if a sphere touches the box
    #[inline]
    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        sphere.intersects_aabb(self)
    }
}

impl Default for AABB {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Bounding Sphere
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere
    #[inline]
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Bounding sphere of a point set (AABB sphere refined with Ritter's pass)
    pub fn from_points(points: &[Vec3]) -> Self {
        if points.is_empty() {
            return Self::new(Vec3::ZERO, 0.0);
        }

        let aabb = AABB::from_points(points);
        let mut sphere = Self::new(aabb.center(), aabb.half_extents().length());

        for &point in points {
            let dist = (point - sphere.center).length();
            if dist > sphere.radius {
                let new_radius = (sphere.radius + dist) * 0.5;
                let k = (new_radius - sphere.radius) / dist;
                sphere.center += (point - sphere.center) * k;
                sphere.radius = new_radius;
            }
        }

        sphere
    }

    /// Check if a point is inside
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }

    /// Check if two spheres intersect
    #[inline]
    pub fn intersects_sphere(&self, other: &Sphere) -> bool {
        let combined_radius = self.radius + other.radius;
        (other.center - self.center).length_squared() <= combined_radius * combined_radius
    }

    /// Check if intersects AABB
    #[inline]
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        aabb.distance_squared_to_point(self.center) <= self.radius * self.radius
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_contains_point() {
        let aabb = AABB::new(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains_point(Vec3::new(0.5, 0.5, 0.5)));
        assert!(!aabb.contains_point(Vec3::new(1.5, 0.5, 0.5)));
    }

    #[test]
    fn test_aabb_intersects() {
        let a = AABB::new(Vec3::ZERO, Vec3::ONE);
        let b = AABB::new(Vec3::new(0.5, 0.5, 0.5), Vec3::new(1.5, 1.5, 1.5));
        let c = AABB::new(Vec3::new(2.0, 2.0, 2.0), Vec3::new(3.0, 3.0, 3.0));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_from_points() {
        let aabb = AABB::from_points(&[Vec3::new(1.0, -2.0, 0.0), Vec3::new(-1.0, 3.0, 2.0)]);
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 3.0, 2.0));
        assert!(AABB::from_points(&[]).is_empty());
    }

    #[test]
    fn test_sphere_aabb() {
        let aabb = AABB::new(Vec3::ZERO, Vec3::ONE);
        assert!(Sphere::new(Vec3::new(1.5, 0.5, 0.5), 0.6).intersects_aabb(&aabb));
        assert!(!Sphere::new(Vec3::new(1.5, 0.5, 0.5), 0.4).intersects_aabb(&aabb));
        // corner distance is sqrt(3) * 0.5
        assert!(!Sphere::new(Vec3::new(1.5, 1.5, 1.5), 0.8).intersects_aabb(&aabb));
    }
}
