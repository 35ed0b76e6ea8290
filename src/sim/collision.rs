//! Flight advance and bounce resolution
//!
//! A bounce does not simulate velocities. When the next step would clip a
//! tree, the rest of the precomputed path is rotated around the tree by the
//! reflection angle and pulled in by the damping factor, so the flight stays
//! a replayable list of waypoints.

use glam::Vec2;

use super::geom::{
    Circle, closest_point_on_segment, out_of_bounds, point_segment_distance, reflect,
    reflect_off_circle, signed_angle,
};
use super::state::Disc;
use super::wind::{WindState, compute_wind_vector};
use crate::tuning::Tuning;

/// Nearest tree to the segment `from`-`to` and its distance
///
/// The first tree in course order wins ties.
pub fn nearest_obstacle(trees: &[Circle], from: Vec2, to: Vec2) -> Option<(&Circle, f32)> {
    trees.iter().fold(None, |best, tree| {
        let dist = point_segment_distance(tree.center, from, to);
        match best {
            Some((_, best_dist)) if best_dist <= dist => best,
            _ => Some((tree, dist)),
        }
    })
}

/// Rewrite the remaining waypoints after a bounce off `tree`
///
/// Each point is rotated around the tree by `angle`, its distance to the
/// tree scaled by `tuning.bounce_damping`. Points that end up within
/// `combined_radius` are dropped and the rest thinned to every
/// `tuning.thin_stride`-th.
pub fn rewrite_after_bounce(
    waypoints: &[Vec2],
    tree: &Circle,
    combined_radius: f32,
    angle: f32,
    tuning: &Tuning,
) -> Vec<Vec2> {
    let rotation = Vec2::from_angle(angle);
    let min_dist_sq = combined_radius * combined_radius;
    waypoints
        .iter()
        .map(|&p| tree.center + rotation.rotate(p - tree.center) * tuning.bounce_damping)
        .filter(|p| p.distance_squared(tree.center) >= min_dist_sq)
        .step_by(tuning.thin_stride.max(1))
        .collect()
}

/// Drop waypoints whose hop from the previous kept position cuts into `tree`
///
/// The damped path is pulled toward the tree, so after a glancing hit the
/// straight line between two waypoints can pass inside `combined_radius`
/// even though both ends lie outside it.
pub fn clear_hops(from: Vec2, waypoints: Vec<Vec2>, tree: &Circle, combined_radius: f32) -> Vec<Vec2> {
    let mut last = from;
    waypoints
        .into_iter()
        .filter(|&p| {
            let clear = point_segment_distance(tree.center, last, p) >= combined_radius;
            if clear {
                last = p;
            }
            clear
        })
        .collect()
}

/// Advance a flying disc by one frame
pub fn advance_flight(
    disc: &Disc,
    trees: &[Circle],
    wind: &WindState,
    frame: u64,
    tuning: &Tuning,
) -> Disc {
    let mut next = disc.clone();
    let Some(index) = disc.planned_index(frame) else {
        next.come_to_rest();
        return next;
    };

    let drift = disc.drift() + compute_wind_vector(wind, frame, tuning.wind_window) * tuning.wind_scale;
    let planned = disc.travel[index] + drift;

    if let Some((tree, dist)) = nearest_obstacle(trees, disc.center, planned) {
        let combined = tree.radius + disc.radius;
        if dist < combined {
            bounce(&mut next, tree, combined, planned, &disc.travel[index..], drift, frame, tuning);
            return next;
        }
    }

    if out_of_bounds(planned) {
        log::debug!("Disc left the field at frame {frame}, back to {:?}", disc.last_shot);
        next.reset_to_last_shot();
    } else {
        next.center = planned;
        next.wind.push(drift);
    }
    next
}

#[allow(clippy::too_many_arguments)]
fn bounce(
    disc: &mut Disc,
    tree: &Circle,
    combined: f32,
    planned: Vec2,
    remaining: &[Vec2],
    drift: Vec2,
    frame: u64,
    tuning: &Tuning,
) {
    let incoming = planned - disc.center;

    // Push out along the line from the tree to the last safe position
    let outward = (disc.center - tree.center)
        .try_normalize()
        .or_else(|| (-incoming).try_normalize())
        .unwrap_or(Vec2::Y);
    let contact = tree.center + outward * combined;

    // Reflect about the tangent at the contact point. A disc that is not
    // closing in along that normal falls back to the closest point of its step.
    let reflected = if incoming.dot(outward) < 0.0 {
        reflect(incoming, outward)
    } else {
        let closest = closest_point_on_segment(tree.center, disc.center, planned);
        reflect_off_circle(incoming, tree, closest).unwrap_or_else(|_| reflect(incoming, outward))
    };
    let angle = signed_angle(incoming, reflected);

    let drifted: Vec<Vec2> = remaining.iter().map(|&p| p + drift).collect();
    let rewritten = rewrite_after_bounce(&drifted, tree, combined, angle, tuning);
    let survivors = clear_hops(disc.center, rewritten, tree, combined);

    log::debug!(
        "Bounce off tree at {:?} on frame {frame}: {} of {} waypoints kept",
        tree.center,
        survivors.len(),
        remaining.len()
    );

    // Survivors are absolute positions, so drift starts over
    disc.wind.clear();
    match survivors.first() {
        None => {
            disc.center = contact;
            disc.travel.clear();
        }
        Some(&first) => {
            disc.center = first;
            disc.travel = survivors;
            disc.travel_start = frame;
        }
    }
}
