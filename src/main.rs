//! Mancala-Solver: adversarial lookup for Kalah.
//!
//! ## Usage
//!
//! - `mancala-solver` - Start the command session on stdin/stdout
//! - `mancala-solver session` - Same as above
//! - `mancala-solver analyze --board 4,4,4,4,4,4,0,4,4,4,4,4,4,0 --turn allied`
//! - `mancala-solver selfplay --seed 7` - Engine against a random mover
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::io;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mancala_solver::constants::{BOARD_LEN, DEFAULT_DEPTH};
use mancala_solver::search::evaluate_best;
use mancala_solver::session::Session;
use mancala_solver::state::{GameState, Side, apply_move, is_terminal};

/// Mancala-Solver: best-line lookup for Kalah
#[derive(Parser)]
#[command(name = "mancala-solver")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Search depth in plies
    #[arg(long, global = true, default_value_t = DEFAULT_DEPTH)]
    depth: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the line-oriented command session
    Session,
    /// Search a single position and print the best line
    Analyze {
        /// Fourteen comma-separated counters, pits 0-13
        #[arg(long)]
        board: String,
        /// Side to move (allied or adversary)
        #[arg(long, default_value = "allied")]
        turn: Side,
    },
    /// Play the engine (allied) against a seeded random mover (adversary)
    Selfplay {
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Session) | None => {
            let mut session = Session::with_depth(cli.depth);
            session
                .run(io::stdin().lock(), io::stdout())
                .context("session I/O failed")?;
        }
        Some(Commands::Analyze { board, turn }) => {
            let state = GameState::from_board(parse_board(&board)?, turn)?;
            run_analyze(&state, cli.depth)?;
        }
        Some(Commands::Selfplay { seed }) => {
            run_selfplay(cli.depth, seed)?;
        }
    }
    Ok(())
}

fn parse_board(text: &str) -> Result<[u8; BOARD_LEN]> {
    let counts = text
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<u8>()
                .with_context(|| format!("invalid pit count: {s:?}"))
        })
        .collect::<Result<Vec<u8>>>()?;
    if counts.len() != BOARD_LEN {
        bail!("expected {BOARD_LEN} counters, got {}", counts.len());
    }
    let mut board = [0u8; BOARD_LEN];
    board.copy_from_slice(&counts);
    Ok(board)
}

fn run_analyze(state: &GameState, depth: u8) -> Result<()> {
    let result = evaluate_best(state, depth)?;
    println!("Board");
    print!("{state}");
    println!("----------------------------");
    println!("To move           : {}", state.turn);
    println!("Allied score      : {}", result.allied);
    println!("Adversary score   : {}", result.adversary);
    let mut line: Vec<String> = result.line.iter().map(|p| p.to_string()).collect();
    if result.game_over {
        line.push("-1".to_string());
    }
    println!("Best moves        : {}", line.join(" "));
    Ok(())
}

fn run_selfplay(depth: u8, seed: u64) -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut state = GameState::new(Side::Allied);
    println!("Mancala-Solver self-play: depth {depth}, seed {seed}\n");

    loop {
        let terminal = is_terminal(&state);
        if terminal.end {
            println!("{state}");
            println!("Game completed.");
            println!("Allied    : {}", terminal.allied);
            println!("Adversary : {}", terminal.adversary);
            return Ok(());
        }

        let pit = match state.turn {
            Side::Allied => evaluate_best(&state, depth)?
                .best_move()
                .context("search returned no move in a live position")?,
            Side::Adversary => {
                let moves: Vec<usize> = state.legal_moves().collect();
                moves[rng.usize(..moves.len())]
            }
        };
        println!("{} plays {pit}", state.turn);
        state = apply_move(&state, pit)?;
    }
}
