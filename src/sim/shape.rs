//! Convex shape overlap test (GJK)
//!
//! Circles, axis-aligned rects and convex polygons share one support-point
//! contract, which is all GJK needs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::{Circle, centroid};
use crate::error::{SimError, SimResult};

/// Upper bound on simplex refinements before giving up as "no overlap"
const MAX_GJK_ITERATIONS: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Circle(Circle),
    /// Axis-aligned rectangle from its top-left corner
    Rect { min: Vec2, size: Vec2 },
    /// Convex polygon, at least three vertices
    Polygon { points: Vec<Vec2> },
}

impl Shape {
    pub fn centre(&self) -> SimResult<Vec2> {
        match self {
            Shape::Circle(circle) => Ok(circle.center),
            Shape::Rect { min, size } => Ok(*min + *size * 0.5),
            Shape::Polygon { points } => {
                if points.len() < 3 {
                    return Err(SimError::TooFewVertices {
                        found: points.len(),
                    });
                }
                centroid(points)
            }
        }
    }

    /// Farthest point of the shape in `direction`
    pub fn support(&self, direction: Vec2) -> SimResult<Vec2> {
        match self {
            Shape::Circle(circle) => {
                let dir = direction.try_normalize().unwrap_or(Vec2::X);
                Ok(circle.center + dir * circle.radius)
            }
            Shape::Rect { min, size } => Ok(Vec2::new(
                if direction.x > 0.0 { min.x + size.x } else { min.x },
                if direction.y > 0.0 { min.y + size.y } else { min.y },
            )),
            Shape::Polygon { points } => points
                .iter()
                .copied()
                .reduce(|best, p| if p.dot(direction) > best.dot(direction) { p } else { best })
                .ok_or(SimError::EmptyInput),
        }
    }
}

/// Support point of the Minkowski difference `a - b`
fn support_diff(a: &Shape, b: &Shape, direction: Vec2) -> SimResult<Vec2> {
    Ok(a.support(direction)? - b.support(-direction)?)
}

/// (a × b) × c, flattened back to the plane
#[inline]
fn triple_product(a: Vec2, b: Vec2, c: Vec2) -> Vec2 {
    let z = a.perp_dot(b);
    Vec2::new(-z * c.y, z * c.x)
}

/// Grow or prune the simplex toward the origin
///
/// Returns `true` once the simplex encloses (or touches) the origin,
/// otherwise updates `direction` for the next support query.
fn evolve_simplex(simplex: &mut Vec<Vec2>, direction: &mut Vec2) -> bool {
    match simplex.len() {
        2 => {
            let a = simplex[1];
            let b = simplex[0];
            let ab = b - a;
            let ao = -a;
            let perp = triple_product(ab, ao, ab);
            if perp.length_squared() == 0.0 {
                // Origin lies on the segment
                return true;
            }
            *direction = perp;
            false
        }
        3 => {
            let a = simplex[2];
            let b = simplex[1];
            let c = simplex[0];
            let ao = -a;
            let ab = b - a;
            let ac = c - a;
            let ab_perp = triple_product(ac, ab, ab);
            let ac_perp = triple_product(ab, ac, ac);

            if ab_perp.dot(ao) > 0.0 {
                simplex.remove(0);
                *direction = ab_perp;
                false
            } else if ac_perp.dot(ao) > 0.0 {
                simplex.remove(1);
                *direction = ac_perp;
                false
            } else {
                true
            }
        }
        n => unreachable!("simplex with {n} vertices"),
    }
}

/// Whether two convex shapes overlap
pub fn overlaps(a: &Shape, b: &Shape) -> SimResult<bool> {
    let mut direction = b.centre()? - a.centre()?;
    if direction.length_squared() == 0.0 {
        direction = Vec2::X;
    }

    let mut simplex = Vec::with_capacity(3);
    simplex.push(support_diff(a, b, direction)?);
    direction = -simplex[0];

    for _ in 0..MAX_GJK_ITERATIONS {
        if direction.length_squared() == 0.0 {
            // First support point is the origin itself
            return Ok(true);
        }
        let point = support_diff(a, b, direction)?;
        if point.dot(direction) < 0.0 {
            return Ok(false);
        }
        simplex.push(point);
        if evolve_simplex(&mut simplex, &mut direction) {
            return Ok(true);
        }
    }

    log::debug!("GJK did not converge after {MAX_GJK_ITERATIONS} iterations");
    Ok(false)
}
