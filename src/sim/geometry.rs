//! Circle geometry and reflection
//!
//! Everything here is a pure function of finite inputs. Degenerate directions
//! (zero-length normals, coincident centers) resolve to [`FALLBACK_NORMAL`]
//! instead of producing NaNs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Direction used whenever a normal cannot be derived from the geometry
pub const FALLBACK_NORMAL: Vec2 = Vec2::X;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Inclusive point containment
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// A circle in arena space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Bounding box around the circle
    pub fn bounding_box(&self) -> Aabb {
        let r = Vec2::splat(self.radius);
        Aabb {
            min: self.center - r,
            max: self.center + r,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.radius * 2.0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.radius * 2.0
    }

    pub fn distance_to(&self, other: &Circle) -> f32 {
        distance(self, other)
    }

    pub fn squared_distance_to(&self, other: &Circle) -> f32 {
        squared_distance(self, other)
    }

    /// Move the circle in place
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Copy of the circle moved by `delta`
    pub fn moved_by(&self, delta: Vec2) -> Circle {
        Circle::new(self.center + delta, self.radius)
    }

    /// True if `point` lies within `min_dist` of the center (inclusive)
    pub fn too_close_to(&self, point: Vec2, min_dist: f32) -> bool {
        self.center.distance(point) <= min_dist
    }

    /// Distance between the two circle outlines; negative when they overlap
    #[inline]
    pub fn gap_to(&self, other: &Circle) -> f32 {
        distance(self, other) - (self.radius + other.radius)
    }
}

/// Euclidean distance between circle centers
#[inline]
pub fn distance(a: &Circle, b: &Circle) -> f32 {
    a.center.distance(b.center)
}

/// Squared distance between circle centers
#[inline]
pub fn squared_distance(a: &Circle, b: &Circle) -> f32 {
    a.center.distance_squared(b.center)
}

/// Touching circles count as overlapping
#[inline]
pub fn overlaps(a: &Circle, b: &Circle) -> bool {
    distance(a, b) <= a.radius + b.radius
}

/// Unit vector pointing from `from` toward `to`
#[inline]
pub fn unit_normal(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or(FALLBACK_NORMAL)
}

/// Reflect velocity about a normal: v' = v - 2(v·n̂)n̂
///
/// `normal` need not be unit length. A zero normal reflects about
/// [`FALLBACK_NORMAL`].
#[inline]
pub fn reflect(vel: Vec2, normal: Vec2) -> Vec2 {
    let n = normal.normalize_or(FALLBACK_NORMAL);
    vel - 2.0 * vel.dot(n) * n
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_distance_and_squared_distance() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 1.0);
        let b = Circle::new(Vec2::new(3.0, 4.0), 1.0);
        assert!((distance(&a, &b) - 5.0).abs() < 1e-6);
        assert!((squared_distance(&a, &b) - 25.0).abs() < 1e-6);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-6);
    }

    #[test]
    fn test_touching_circles_overlap() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 5.0);
        let b = Circle::new(Vec2::new(10.0, 0.0), 5.0);
        assert!(overlaps(&a, &b));

        let c = Circle::new(Vec2::new(10.5, 0.0), 5.0);
        assert!(!overlaps(&a, &c));
        assert!(a.gap_to(&c) > 0.0);
    }

    #[test]
    fn test_bounding_box() {
        let c = Circle::new(Vec2::new(10.0, 20.0), 5.0);
        let bb = c.bounding_box();
        assert_eq!(bb.min, Vec2::new(5.0, 15.0));
        assert_eq!(bb.max, Vec2::new(15.0, 25.0));
        assert_eq!(bb.width(), c.width());
        assert_eq!(bb.height(), c.height());
        assert_eq!(bb.center(), c.center);
        assert!(bb.contains(Vec2::new(15.0, 25.0)));
    }

    #[test]
    fn test_move_and_too_close() {
        let mut c = Circle::new(Vec2::ZERO, 2.0);
        let moved = c.moved_by(Vec2::new(1.0, 1.0));
        assert_eq!(c.center, Vec2::ZERO);
        assert_eq!(moved.center, Vec2::new(1.0, 1.0));

        c.translate(Vec2::new(3.0, 0.0));
        assert_eq!(c.center, Vec2::new(3.0, 0.0));
        assert!(c.too_close_to(Vec2::new(5.0, 0.0), 2.0));
        assert!(!c.too_close_to(Vec2::new(5.5, 0.0), 2.0));
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let reflected = reflect(Vec2::new(100.0, 0.0), Vec2::new(-1.0, 0.0));
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);

        // Non-unit normal is normalized first
        let reflected = reflect(Vec2::new(1.0, -1.0), Vec2::new(0.0, 10.0));
        assert!((reflected - Vec2::new(1.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_zero_normal_uses_fallback() {
        let reflected = reflect(Vec2::new(2.0, 3.0), Vec2::ZERO);
        assert!((reflected - Vec2::new(-2.0, 3.0)).length() < 1e-6);
        assert_eq!(unit_normal(Vec2::ONE, Vec2::ONE), FALLBACK_NORMAL);
    }

    proptest! {
        #[test]
        fn reflection_preserves_speed(
            vx in -100.0f32..100.0,
            vy in -100.0f32..100.0,
            angle in 0.0f32..std::f32::consts::TAU,
        ) {
            let v = Vec2::new(vx, vy);
            let n = Vec2::new(angle.cos(), angle.sin());
            let r = reflect(v, n);
            prop_assert!((r.length() - v.length()).abs() <= 1e-3 * (1.0 + v.length()));
        }
    }
}
