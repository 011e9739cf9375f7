//! Breakout entry point
//!
//! Headless runner: plays autopilot games and reports how they went.
//!
//! Example:
//!   RUST_LOG=info cargo run -- --width 800 --height 600 --games 3

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use breakout::Tuning;
use breakout::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play breakout games on autopilot", long_about = None)]
struct Args {
    /// Board width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Board height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Give up on a game after this many ticks
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,
    /// Games to play
    #[arg(long, default_value_t = 1)]
    games: u32,
    /// JSON tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Print the final state of each game as JSON
    #[arg(long)]
    dump_state: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Breakout (headless) starting...");

    let args = Args::parse();
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path).with_context(|| format!("load tuning {:?}", path))?,
        None => Tuning::default(),
    };

    let mut state = GameState::new(args.width, args.height, &tuning).context("set up game")?;
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    for game in 1..=args.games {
        if game > 1 {
            state.restart(&tuning).context("restart game")?;
        }
        while !state.is_over() && state.time_ticks < args.max_ticks {
            let event = tick(&mut state, &input, &tuning).context("reset ball after a miss")?;
            match event {
                Some(GameEvent::LifeLost { lives_left }) => {
                    log::info!("Game {game}: life lost, {lives_left} left")
                }
                Some(GameEvent::GameOver) => log::info!("Game {game}: game over"),
                Some(GameEvent::Won) => log::info!("Game {game}: won"),
                None => {}
            }
        }

        let result = match state.phase {
            GamePhase::Won => "won",
            GamePhase::Lost => "lost",
            GamePhase::Playing => "unfinished",
        };
        println!(
            "game {game}: {result} after {} ticks, {} of {} cells left, {} lives",
            state.time_ticks,
            state.grid.remaining(),
            state.grid.rows() * state.grid.cols(),
            state.lives
        );
        if args.dump_state {
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
    }
    Ok(())
}
