//! Vector and segment geometry
//!
//! Thin layer over `glam::Vec2`: the arithmetic (add, scale, dot, length,
//! distance) comes straight from glam, this module adds the queries the
//! flight code needs and makes degenerate inputs fail loudly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::error::{SimError, SimResult};

/// A circle: disc, tree or basket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Strict overlap: touching circles do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Circle) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) < reach * reach
    }
}

/// Sum of any number of vectors
pub fn sum(vectors: &[Vec2]) -> Vec2 {
    vectors.iter().copied().sum()
}

/// Vector pointing from `a` to `b`
#[inline]
pub fn a_to_b(a: Vec2, b: Vec2) -> Vec2 {
    b - a
}

/// Unit vector in the direction of `v`
pub fn unit(v: Vec2) -> SimResult<Vec2> {
    v.try_normalize().ok_or(SimError::ZeroVector)
}

/// Unit perpendicular, rotated a quarter turn clockwise (y up)
pub fn perp_cw(v: Vec2) -> SimResult<Vec2> {
    unit(Vec2::new(v.y, -v.x))
}

/// Unit perpendicular, rotated a quarter turn counter-clockwise (y up)
pub fn perp_ccw(v: Vec2) -> SimResult<Vec2> {
    unit(v.perp())
}

/// Linear interpolation, `t` clamped to [0, 1]
#[inline]
pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a.lerp(b, t.clamp(0.0, 1.0))
}

/// Closest point to `p` on the segment `a`-`b`
///
/// A zero-length segment collapses to `a`.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

#[inline]
pub fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    p.distance(closest_point_on_segment(p, a, b))
}

/// Standard reflection: d' = d - 2(d·n)n, `normal` must be unit length
#[inline]
pub fn reflect(direction: Vec2, normal: Vec2) -> Vec2 {
    direction - 2.0 * direction.dot(normal) * normal
}

/// Reflect a travel direction about the tangent of `obstacle` at `contact`
///
/// The normal is taken from the obstacle center through the contact point.
pub fn reflect_off_circle(direction: Vec2, obstacle: &Circle, contact: Vec2) -> SimResult<Vec2> {
    let normal = unit(contact - obstacle.center)?;
    Ok(reflect(direction, normal))
}

/// Whether a point lies outside the playing field
#[inline]
pub fn out_of_bounds(p: Vec2) -> bool {
    p.x < 0.0 || p.y < 0.0 || p.x > FIELD_WIDTH || p.y > FIELD_HEIGHT
}

/// Mean of a non-empty set of points
pub fn centroid(points: &[Vec2]) -> SimResult<Vec2> {
    if points.is_empty() {
        return Err(SimError::EmptyInput);
    }
    Ok(sum(points) / points.len() as f32)
}

/// The point farthest from the segment `a`-`b`; the first one wins ties
pub fn farthest_from_segment(points: &[Vec2], a: Vec2, b: Vec2) -> SimResult<Vec2> {
    let (first, rest) = points.split_first().ok_or(SimError::EmptyInput)?;
    let mut best = *first;
    let mut best_dist = point_segment_distance(best, a, b);
    for &p in rest {
        let dist = point_segment_distance(p, a, b);
        if dist > best_dist {
            best = p;
            best_dist = dist;
        }
    }
    Ok(best)
}

/// Signed angle (radians) rotating `from` onto `to`
#[inline]
pub fn signed_angle(from: Vec2, to: Vec2) -> f32 {
    from.perp_dot(to).atan2(from.dot(to))
}
