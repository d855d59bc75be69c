//! Circus-Bot: a minimax agent for the circus board game.
//!
//! ## Usage
//!
//! - `circus-bot` - Play one game over stdin/stdout
//! - `circus-bot play` - Same as above
//! - `circus-bot demo` - Self-play against a random opponent
//!
//! Diagnostics go to stderr; set `RUST_LOG=info` (or `debug`) to see them.

use std::io;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use circus_bot::board::Pos;
use circus_bot::constants::{MAX_DEPTH, MAX_STEPS, PRUNE_MARGIN, SEARCH_BUDGET};
use circus_bot::diagnostics::LogSink;
use circus_bot::game::GameState;
use circus_bot::movegen::legal_moves;
use circus_bot::piece::Player;
use circus_bot::protocol;
use circus_bot::search::{SearchConfig, Searcher};

/// Circus-Bot: a minimax agent for the circus board game
#[derive(Parser)]
#[command(name = "circus-bot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    tuning: Tuning,
}

#[derive(Args)]
struct Tuning {
    /// Stop after this many half-moves
    #[arg(long, global = true, default_value_t = MAX_STEPS)]
    max_steps: u32,

    /// Approximate number of states searched per move
    #[arg(long, global = true, default_value_t = SEARCH_BUDGET)]
    budget: u64,

    /// Pruning window around the best shallow score
    #[arg(long, global = true, default_value_t = PRUNE_MARGIN)]
    margin: i32,

    /// Upper bound on the search depth
    #[arg(long, global = true, default_value_t = MAX_DEPTH)]
    max_depth: u32,
}

impl Tuning {
    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            budget: self.budget,
            margin: self.margin,
            max_depth: self.max_depth,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game over stdin/stdout
    Play,
    /// Play against a random opponent and print the game
    Demo {
        /// Seed for the random opponent
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Demo { seed }) => run_demo(&cli.tuning, seed),
        Some(Commands::Play) | None => {
            let stdin = io::stdin();
            let state = protocol::play(
                stdin.lock(),
                io::stdout().lock(),
                cli.tuning.search_config(),
                cli.tuning.max_steps,
                Box::new(LogSink),
            )
            .context("game protocol failed")?;
            log::info!("finished after {} steps", state.steps);
            Ok(())
        }
    }
}

fn run_demo(tuning: &Tuning, seed: u64) -> anyhow::Result<()> {
    println!("Circus-Bot demo: searcher plays first, random opponent second\n");

    let mut houses: Vec<Pos> = (0..9).map(|row| Pos::new(row, 8)).collect();
    houses.extend([1, 3, 5, 7].map(|row| Pos::new(row, 10)));
    let mut state = GameState::new(&houses, Player::First);
    let mut rng = fastrand::Rng::with_seed(seed);
    let sink = LogSink;

    while !state.is_over(tuning.max_steps) {
        let mv = if state.my_turn() {
            Searcher::new(tuning.search_config(), &sink).choose_move(&state)
        } else {
            let moves = legal_moves(&state, true);
            moves[rng.usize(..moves.len())].mv
        };
        let kind = state.play(mv);
        println!("{:>3}: {} {mv} ({kind:?})", state.steps, state.current.opponent());
    }

    println!("\n{}", state.board);
    println!(
        "{} steps, {} of {} houses still free",
        state.steps,
        state.board.free_houses().len(),
        state.board.houses().len()
    );
    Ok(())
}
