//! Disc Golf headless runner
//!
//! Plays the course with a scripted thrower that aims straight at the basket
//! and logs how each hole went. Usage:
//!
//! ```text
//! disc-golf [--seed N] [--tuning tuning.json] [--levels course.json]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod runner {
    use std::path::PathBuf;

    use clap::Parser;
    use disc_golf::sim::{GameState, LevelPhase, TickInput, tick};
    use disc_golf::{LevelTemplate, SimError, Tuning, levels};

    /// Give up on a hole after this many throws
    const MAX_THROWS_PER_HOLE: u32 = 12;
    /// Frames a single throw may take before the runner stops waiting
    const MAX_FLIGHT_FRAMES: u32 = 2_000;

    #[derive(Parser)]
    #[command(name = "disc-golf")]
    #[command(about = "Play a disc golf course with a scripted thrower")]
    pub struct Options {
        /// Seed for the wind RNG
        #[arg(long, default_value_t = 0x5EED)]
        pub seed: u64,
        /// JSON file overriding the simulation tuning
        #[arg(long)]
        pub tuning: Option<PathBuf>,
        /// JSON course to play instead of the built-in levels
        #[arg(long)]
        pub levels: Option<PathBuf>,
    }

    fn load_course(options: &Options) -> Result<Vec<LevelTemplate>, SimError> {
        match &options.levels {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .map_err(|e| SimError::LevelData(format!("{}: {e}", path.display())))?;
                levels::from_json(&json)
            }
            None => Ok(levels::builtin()),
        }
    }

    /// Let the current flight play out
    fn settle(mut state: GameState) -> GameState {
        for _ in 0..MAX_FLIGHT_FRAMES {
            if !state.level.disc.is_flying() {
                break;
            }
            state = tick(&state, &TickInput::default());
        }
        // One more frame so a disc that came to rest on the basket counts
        tick(&state, &TickInput::default())
    }

    /// Drag from the disc straight toward the basket
    fn aim(state: &GameState) -> TickInput {
        let to_basket = state.level.basket.center - state.level.disc.center;
        TickInput::release(vec![glam::Vec2::ZERO, to_basket * 0.5, to_basket])
    }

    pub fn run(options: Options) -> Result<(), SimError> {
        let tuning = options
            .tuning
            .as_deref()
            .map(Tuning::load)
            .unwrap_or_default();
        let course = load_course(&options)?;
        let mut state = GameState::new(course, options.seed, tuning)?;

        let mut total_score = 0i64;
        loop {
            while !state.level.is_won() && state.level.nr_shots < MAX_THROWS_PER_HOLE {
                state = tick(&state, &aim(&state));
                state = settle(state);
            }

            let level = &state.level;
            match level.phase() {
                LevelPhase::Won { at } => {
                    total_score += level.score();
                    println!(
                        "{:<32} {:>2} shots (par {}) holed at frame {at}",
                        level.name, level.nr_shots, level.par
                    );
                }
                _ => {
                    println!("{:<32} gave up after {} shots", level.name, level.nr_shots);
                    break;
                }
            }

            if state.on_last_level() {
                break;
            }
            state = tick(&state, &TickInput::click());
        }

        println!("Finished at frame {} ({total_score:+} against par)", state.frame);
        Ok(())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::runner::Options;

    #[test]
    fn test_options_defaults() {
        let options = Options::try_parse_from(["disc-golf"]).unwrap();
        assert_eq!(options.seed, 0x5EED);
        assert!(options.tuning.is_none());
        assert!(options.levels.is_none());
    }

    #[test]
    fn test_options_flags() {
        let options = Options::try_parse_from([
            "disc-golf",
            "--seed",
            "42",
            "--tuning",
            "tuning.json",
            "--levels",
            "course.json",
        ])
        .unwrap();
        assert_eq!(options.seed, 42);
        assert_eq!(options.tuning, Some(PathBuf::from("tuning.json")));
        assert_eq!(options.levels, Some(PathBuf::from("course.json")));
    }

    #[test]
    fn test_options_reject_bad_input() {
        assert!(Options::try_parse_from(["disc-golf", "--seed", "windy"]).is_err());
        assert!(Options::try_parse_from(["disc-golf", "--holes", "3"]).is_err());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Disc Golf (headless) starting...");

    if let Err(e) = runner::run(runner::Options::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is a library on the web; the host drives `tick`
}
