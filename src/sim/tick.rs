//! Per-frame state transition
//!
//! `tick` takes the previous snapshot and this frame's input and returns the
//! next snapshot. The previous state is never touched.

use super::collision::advance_flight;
use super::state::{GameState, Key, Level, TickInput};
use super::travel::travel_from_drag;
use super::wind::advance_wind;

/// Advance the game by one frame
pub fn tick(state: &GameState, input: &TickInput) -> GameState {
    if input.keys.contains(&Key::Reset) {
        log::info!("Reset at frame {}", state.frame);
        return state.restart();
    }

    let frame = state.frame;
    let mut next = state.clone();
    next.frame = frame + 1;
    next.input = input.clone();

    // Won levels wait for a click, then nothing else happens this frame
    if next.level.is_won() && input.clicked {
        advance_level(&mut next, frame);
        return next;
    }

    check_win(&mut next.level, frame);
    next.level.wind = advance_wind(&next.level.wind, frame, next.tuning.wind_window, &mut next.rng);
    update_disc(&mut next, input, frame);

    next
}

/// Mark the level won the first time the disc touches the basket
fn check_win(level: &mut Level, frame: u64) {
    if level.won_at.is_none() && level.disc.circle().overlaps(&level.basket) {
        level.won_at = Some(frame);
        log::info!(
            "'{}' won at frame {frame} in {} shots (par {})",
            level.name,
            level.nr_shots,
            level.par
        );
    }
}

/// Move on to the next template; the last level stays put
fn advance_level(state: &mut GameState, frame: u64) {
    if state.on_last_level() {
        log::debug!("Course complete, staying on '{}'", state.level.name);
        return;
    }
    state.level_index += 1;
    state.level = Level::from_template(&state.templates[state.level_index], &mut state.rng, frame);
    state.trail.clear();
    log::info!("Advanced to level {} '{}'", state.level_index + 1, state.level.name);
}

/// Throw on release if the disc is at rest, otherwise keep it flying
fn update_disc(state: &mut GameState, input: &TickInput, frame: u64) {
    let level = &mut state.level;

    if level.disc.is_flying() {
        level.disc = advance_flight(&level.disc, &level.trees, &level.wind, frame, &state.tuning);
        return;
    }

    if !input.released || level.is_won() {
        return;
    }

    match travel_from_drag(level.disc.center, &input.drag, &state.tuning) {
        Some(travel) => {
            level.nr_shots += 1;
            log::debug!(
                "Shot {} on '{}': {} waypoints from {:?}",
                level.nr_shots,
                level.name,
                travel.len(),
                level.disc.center
            );
            state.trail = travel.clone();
            level.disc.launch(travel, frame);
        }
        None => log::trace!("Ignoring release without displacement"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelTemplate;
    use crate::sim::geom::Circle;
    use crate::sim::state::LevelPhase;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn template(name: &str, disc: Vec2, basket: Vec2, trees: Vec<Circle>) -> LevelTemplate {
        LevelTemplate {
            name: name.into(),
            trees,
            basket: Circle::new(basket, 30.0),
            disc_start: disc,
            disc_radius: 20.0,
            par: 2,
        }
    }

    fn open_field() -> LevelTemplate {
        template("open", Vec2::new(177.0, 550.0), Vec2::new(177.0, 80.0), Vec::new())
    }

    fn state_with(templates: Vec<LevelTemplate>) -> GameState {
        GameState::new(templates, 12345, Tuning::default()).unwrap()
    }

    /// Drag straight up by `length` pixels
    fn throw_up(length: f32) -> TickInput {
        TickInput::release(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, -length / 2.0),
            Vec2::new(0.0, -length),
        ])
    }

    fn run_until_rest(mut state: GameState, max_frames: u32) -> GameState {
        for _ in 0..max_frames {
            if !state.level.disc.is_flying() {
                break;
            }
            state = tick(&state, &TickInput::default());
        }
        state
    }

    #[test]
    fn test_basket_on_start_wins_immediately() {
        let start = Vec2::new(100.0, 100.0);
        let state = state_with(vec![template("gimme", start, start, Vec::new())]);
        let frame = state.frame;

        let next = tick(&state, &TickInput::default());
        assert_eq!(next.level.won_at, Some(frame));
        assert_eq!(next.phase(), LevelPhase::Won { at: frame });
        assert_eq!(next.level.nr_shots, 0);
        assert_eq!(next.frame, frame + 1);
    }

    #[test]
    fn test_zero_drag_is_not_a_shot() {
        let state = state_with(vec![open_field()]);
        let input = TickInput::release(vec![Vec2::ZERO, Vec2::ZERO]);

        let next = tick(&state, &input);
        assert_eq!(next.level.nr_shots, 0);
        assert!(!next.level.disc.is_flying());
        assert_eq!(next.phase(), LevelPhase::Aiming);
        assert!(next.trail.is_empty());

        // Releasing without any samples is ignored too
        let next = tick(&next, &TickInput::release(Vec::new()));
        assert_eq!(next.level.nr_shots, 0);
    }

    #[test]
    fn test_shot_counts_once() {
        let state = state_with(vec![open_field()]);
        let mut state = tick(&state, &throw_up(200.0));
        assert_eq!(state.level.nr_shots, 1);
        assert_eq!(state.phase(), LevelPhase::Flying);
        assert_eq!(state.level.disc.last_shot, Vec2::new(177.0, 550.0));
        assert_eq!(state.trail.len(), state.level.disc.travel.len());

        // Releasing again mid-flight does not start another throw
        for _ in 0..5 {
            state = tick(&state, &throw_up(200.0));
        }
        assert_eq!(state.level.nr_shots, 1);
    }

    #[test]
    fn test_previous_snapshot_untouched() {
        let state = state_with(vec![open_field()]);
        let before = state.level.clone();
        let _ = tick(&state, &throw_up(200.0));
        assert_eq!(state.level, before);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_won_level_is_stable_without_click() {
        let start = Vec2::new(100.0, 100.0);
        let mut state = state_with(vec![
            template("gimme", start, start, Vec::new()),
            open_field(),
        ]);
        state = tick(&state, &TickInput::default());
        let won_at = state.level.won_at;
        assert!(won_at.is_some());

        for _ in 0..500 {
            state = tick(&state, &TickInput::default());
        }
        assert_eq!(state.level.won_at, won_at);
        assert_eq!(state.level.nr_shots, 0);
        assert_eq!(state.level_index, 0);

        // A release on a won level does not count as a shot
        state = tick(&state, &throw_up(100.0));
        assert_eq!(state.level.nr_shots, 0);
    }

    #[test]
    fn test_click_advances_and_clamps() {
        let start = Vec2::new(100.0, 100.0);
        let mut state = state_with(vec![
            template("gimme", start, start, Vec::new()),
            template("gimme 2", start, start, Vec::new()),
        ]);

        // Clicking before winning does nothing
        state = tick(&state, &TickInput::click());
        assert!(state.level.is_won());
        assert_eq!(state.level_index, 0);

        state = tick(&state, &TickInput::click());
        assert_eq!(state.level_index, 1);
        assert_eq!(state.level.name, "gimme 2");
        assert_eq!(state.level.won_at, None);

        state = tick(&state, &TickInput::default());
        assert!(state.level.is_won());
        let won_at = state.level.won_at;

        // No wraparound past the last level
        state = tick(&state, &TickInput::click());
        assert_eq!(state.level_index, 1);
        assert_eq!(state.level.won_at, won_at);
    }

    #[test]
    fn test_reset_reinitializes() {
        let state = state_with(vec![open_field()]);
        let mut state = tick(&state, &throw_up(200.0));
        state = tick(&state, &TickInput::default());
        assert!(state.frame > 0);

        let reset = tick(&state, &TickInput::holding(Key::Reset));
        assert_eq!(reset.frame, 0);
        assert_eq!(reset.level.nr_shots, 0);
        assert!(!reset.level.disc.is_flying());
        assert_eq!(reset.level.disc.center, Vec2::new(177.0, 550.0));
        assert_eq!(reset.level.wind, state_with(vec![open_field()]).level.wind);
    }

    #[test]
    fn test_throw_into_basket_wins() {
        let tuning = Tuning {
            wind_scale: 0.0,
            ..Default::default()
        };
        let state = GameState::new(vec![open_field()], 7, tuning).unwrap();

        let state = tick(&state, &throw_up(470.0));
        let state = run_until_rest(state, 1000);
        let state = tick(&state, &TickInput::default());
        assert!(state.level.is_won());
        assert_eq!(state.level.nr_shots, 1);
        assert!(state.level.score() < 0);
    }

    #[test]
    fn test_out_of_bounds_returns_to_last_shot() {
        let tuning = Tuning {
            wind_scale: 0.0,
            ..Default::default()
        };
        let start = Vec2::new(177.0, 550.0);
        let level = template("edge", start, Vec2::new(30.0, 30.0), Vec::new());
        let state = GameState::new(vec![level], 7, tuning).unwrap();

        // Thrown far past the bottom edge
        let state = tick(
            &state,
            &TickInput::release(vec![Vec2::ZERO, Vec2::new(0.0, 300.0)]),
        );
        let state = run_until_rest(state, 1000);
        assert_eq!(state.level.disc.center, start);
        assert!(state.level.disc.travel.is_empty());
        assert!(state.level.disc.wind.is_empty());
        assert_eq!(state.level.nr_shots, 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let inputs = [
            TickInput::default(),
            throw_up(300.0),
            TickInput::default(),
            TickInput::default(),
        ];

        let mut state1 = GameState::new(crate::levels::builtin(), 99999, Tuning::default()).unwrap();
        let mut state2 = GameState::new(crate::levels::builtin(), 99999, Tuning::default()).unwrap();
        for input in inputs.iter().chain(std::iter::repeat_n(&TickInput::default(), 400)) {
            state1 = tick(&state1, input);
            state2 = tick(&state2, input);
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.level, state2.level);
        assert_eq!(state1.trail, state2.trail);
    }
}
