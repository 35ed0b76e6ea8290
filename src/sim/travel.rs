//! Flight path generation from a drag gesture
//!
//! A throw is a quadratic Bézier from the disc through a control point taken
//! from the curvature of the drag. Samples bunch up toward the end of the
//! curve so the disc visibly slows down before it lands.

use glam::Vec2;

use super::geom::farthest_from_segment;
use crate::error::{SimError, SimResult};
use crate::tuning::Tuning;

/// Upper bound on the samples of a single throw
const MAX_TRAVEL_SAMPLES: u32 = 4096;

/// Control and end point of a drag gesture
///
/// The control point is the sample that strays farthest from the straight
/// line between the first and last sample; the end is the release point.
pub fn build_shot_endpoints(samples: &[Vec2]) -> SimResult<(Vec2, Vec2)> {
    let (first, last) = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(SimError::EmptyInput),
    };
    let control = farthest_from_segment(samples, first, last)?;
    Ok((control, last))
}

/// Point on the quadratic Bézier at parameter `t`
#[inline]
pub fn bezier(start: Vec2, control: Vec2, end: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    start * (u * u) + control * (2.0 * t * u) + end * (t * t)
}

/// Sample a throw from `start` to `end`
///
/// Returns `None` when start and end coincide: there is nothing to throw.
/// The first sample is `start` and the last one is exactly `end`.
pub fn build_travel(start: Vec2, control: Vec2, end: Vec2, tuning: &Tuning) -> Option<Vec<Vec2>> {
    let distance = start.distance(end);
    if distance <= 0.0 || !distance.is_finite() {
        return None;
    }
    let step = 1.0 / (tuning.travel_density * distance);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let step = step.max(1.0 / MAX_TRAVEL_SAMPLES as f32);

    let mut params: Vec<f32> = (0..MAX_TRAVEL_SAMPLES)
        .map(|i| i as f32 * step)
        .take_while(|&t| t < 1.0)
        .map(|t| t.powf(tuning.travel_easing))
        .collect();
    params.push(1.0);

    let last = params[params.len() - 1];
    Some(
        params
            .into_iter()
            .map(|t| bezier(start, control, end, t / last))
            .collect(),
    )
}

/// Turn a recorded drag into a flight path for a disc at `origin`
///
/// The gesture is replayed relative to where the drag began, so only its
/// shape matters, not where on screen it was drawn.
pub fn travel_from_drag(origin: Vec2, drag: &[Vec2], tuning: &Tuning) -> Option<Vec<Vec2>> {
    let anchor = *drag.first()?;
    let (control, end) = build_shot_endpoints(drag).ok()?;
    let offset = origin - anchor;
    build_travel(origin, control + offset, end + offset, tuning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_endpoints_pick_widest_sample() {
        let drag = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 5.0),
            Vec2::new(20.0, 12.0),
            Vec2::new(30.0, 4.0),
            Vec2::new(40.0, 0.0),
        ];
        let (control, end) = build_shot_endpoints(&drag).unwrap();
        assert_eq!(control, Vec2::new(20.0, 12.0));
        assert_eq!(end, Vec2::new(40.0, 0.0));
    }

    #[test]
    fn test_endpoints_empty() {
        assert_eq!(build_shot_endpoints(&[]), Err(SimError::EmptyInput));
    }

    #[test]
    fn test_zero_length_is_no_shot() {
        let p = Vec2::new(50.0, 50.0);
        assert!(build_travel(p, Vec2::new(80.0, 10.0), p, &Tuning::default()).is_none());
        assert!(travel_from_drag(p, &[Vec2::ZERO, Vec2::ZERO], &Tuning::default()).is_none());
        assert!(travel_from_drag(p, &[], &Tuning::default()).is_none());
    }

    #[test]
    fn test_samples_bunch_toward_end() {
        let start = Vec2::new(0.0, 0.0);
        let end = Vec2::new(300.0, 0.0);
        let travel = build_travel(start, Vec2::new(150.0, 0.0), end, &Tuning::default()).unwrap();

        // A step of 1 / (0.2 * 300) gives about 60 samples
        assert!((60..=62).contains(&travel.len()));
        assert_eq!(travel[0], start);
        let first_gap = travel[1].distance(travel[0]);
        let last_gap = travel[travel.len() - 1].distance(travel[travel.len() - 2]);
        assert!(first_gap > last_gap);
    }

    #[test]
    fn test_drag_is_relative_to_disc() {
        let origin = Vec2::new(100.0, 500.0);
        let drag = [Vec2::new(10.0, 10.0), Vec2::new(10.0, -90.0)];
        let travel = travel_from_drag(origin, &drag, &Tuning::default()).unwrap();
        assert_eq!(travel[0], origin);
        let end = travel[travel.len() - 1];
        assert!((end - Vec2::new(100.0, 400.0)).length() < 1e-3);
    }

    #[test]
    fn test_huge_throw_sample_count_is_capped() {
        let start = Vec2::new(0.0, 0.0);
        let end = Vec2::new(1.0e9, 0.0);
        let travel = build_travel(start, Vec2::new(5.0e8, 1.0e8), end, &Tuning::default()).unwrap();
        assert!(travel.len() <= MAX_TRAVEL_SAMPLES as usize + 1);
        assert_eq!(travel[0], start);
        assert_eq!(travel[travel.len() - 1], end);
    }

    proptest! {
        #[test]
        fn travel_ends_exactly_at_end(
            sx in 0.0f32..355.0, sy in 0.0f32..612.0,
            cx in -200.0f32..600.0, cy in -200.0f32..800.0,
            ex in 0.0f32..355.0, ey in 0.0f32..612.0,
        ) {
            let start = Vec2::new(sx, sy);
            let end = Vec2::new(ex, ey);
            prop_assume!(start != end);
            let travel = build_travel(start, Vec2::new(cx, cy), end, &Tuning::default()).unwrap();
            let last = travel[travel.len() - 1];
            prop_assert!(last.distance(end) < 1e-3);
            prop_assert!(travel.len() >= 2);
        }
    }
}
