//! Brickfall headless demo runner
//!
//! Plays the game with the built-in idle AI at the fixed timestep and
//! prints a run summary. Useful for smoke-testing balance changes without
//! wiring up a frontend: `brickfall [seed] [max_ticks]`.

use std::path::Path;

use brickfall::consts::SIM_DT;
use brickfall::highscores::HighScores;
use brickfall::sim::{GamePhase, TickInput, new_game, tick};
use brickfall::tuning::Tuning;

const SCORES_PATH: &str = "brickfall_scores.json";
const TUNING_PATH: &str = "brickfall_tuning.json";
const DEFAULT_SEED: u64 = 0xB12C;
/// Ten minutes of simulated play
const DEFAULT_MAX_TICKS: u64 = 120 * 600;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let max_ticks: u64 = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(DEFAULT_MAX_TICKS);

    let tuning = Tuning::load_from(Path::new(TUNING_PATH)).unwrap_or_default();
    log::info!("starting autoplay run, seed {seed:#x}");

    let mut state = new_game(seed, tuning);
    let input = TickInput {
        idle_mode: true,
        ..TickInput::default()
    };
    while state.time_ticks < max_ticks && state.phase != GamePhase::GameOver {
        tick(&mut state, &input, SIM_DT);
    }

    let outcome = if state.phase == GamePhase::GameOver {
        "game over"
    } else {
        "tick limit reached"
    };
    println!(
        "{outcome}: seed {seed:#x}, score {}, level {}, {} ticks",
        state.score, state.level_index, state.time_ticks
    );

    let path = Path::new(SCORES_PATH);
    let mut scores = HighScores::load_from(path).unwrap_or_default();
    if let Some(rank) = scores.add(state.score, state.level_index, state.time_ticks) {
        match scores.save_to(path) {
            Ok(()) => println!("new high score, rank {rank}"),
            Err(err) => log::warn!("could not save high scores: {err}"),
        }
    }
}
