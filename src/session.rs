//! Line-oriented command session for playing along with a live game.
//!
//! The session keeps one game position and a search depth. Each input line is
//! a command; each response starts with `=` on success or `?` on failure,
//! optionally followed by the numeric id the command was sent with, and is
//! terminated by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version` - Engine identification
//! - `list_commands`, `known_command <cmd>` - Command discovery
//! - `quit` - End the session
//! - `depth [n]` - Show or set the search depth
//! - `starter <y|n>` - Choose whether the allied side moves first (resets the board)
//! - `reset` - Start a new game with the current starter and depth
//! - `setboard <14 counts> <allied|adversary>` - Load an arbitrary position
//! - `board` - Show the board and the side to move
//! - `play <pit>` - Apply a move (pit 0-12)
//! - `analyze` - Search the current position and report scores and best line
//! - `genmove` - Play the engine's best move for the side to move
//!
//! When a move finishes the game the final scores are reported and the board
//! is reset automatically.
//!
//! ## Example
//!
//! ```ignore
//! use mancala_solver::session::Session;
//! let mut session = Session::new();
//! session.run(std::io::stdin().lock(), std::io::stdout())?;
//! ```

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use crate::constants::{ADVERSARY_STORE, BOARD_LEN, DEFAULT_DEPTH};
use crate::search::evaluate_best;
use crate::state::{GameState, Pit, Side, apply_move, is_terminal};

/// The list of known session commands.
const KNOWN_COMMANDS: &[&str] = &[
    "analyze",
    "board",
    "depth",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "reset",
    "setboard",
    "starter",
    "version",
];

/// Session state.
pub struct Session {
    /// Current game position
    state: GameState,
    /// Side that moves first after a reset
    starter: Side,
    /// Search depth for `analyze` and `genmove`
    depth: u8,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session at the default depth with the allied side to move.
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_DEPTH)
    }

    pub fn with_depth(depth: u8) -> Self {
        Self {
            state: GameState::new(Side::Allied),
            starter: Side::Allied,
            depth,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        debug!(command, ?args, "session command");
        match command {
            "name" => (true, "mancala-solver".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "depth" => {
                if args.is_empty() {
                    return (true, self.depth.to_string());
                }
                match args[0].parse::<u8>() {
                    Ok(depth) => {
                        self.depth = depth;
                        (true, String::new())
                    }
                    Err(_) => (false, "invalid depth".to_string()),
                }
            }

            "starter" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let starter = if args[0].eq_ignore_ascii_case("y") {
                    Side::Allied
                } else if args[0].eq_ignore_ascii_case("n") {
                    Side::Adversary
                } else {
                    return (false, "expected y or n".to_string());
                };
                self.starter = starter;
                self.reset();
                (true, String::new())
            }

            "reset" => {
                self.reset();
                (true, String::new())
            }

            "setboard" => self.set_board(args),

            "board" => (true, self.render()),

            "play" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let pit = match args[0].parse::<Pit>() {
                    Ok(pit) if pit < ADVERSARY_STORE => pit,
                    _ => return (false, "invalid input".to_string()),
                };
                self.play(pit)
            }

            "analyze" => match evaluate_best(&self.state, self.depth) {
                Ok(result) => {
                    let mut line: Vec<String> =
                        result.line.iter().map(|p| p.to_string()).collect();
                    if result.game_over {
                        line.push("-1".to_string());
                    }
                    let mut out = self.render();
                    let _ = writeln!(out, "allied score: {}", result.allied);
                    let _ = writeln!(out, "adversary score: {}", result.adversary);
                    let _ = write!(out, "best moves: {}", line.join(" "));
                    (true, out)
                }
                Err(e) => (false, e.to_string()),
            },

            "genmove" => match evaluate_best(&self.state, self.depth) {
                Ok(result) => match result.best_move() {
                    Some(pit) => {
                        let (success, message) = self.play(pit);
                        if !success {
                            return (false, message);
                        }
                        if message.is_empty() {
                            (true, pit.to_string())
                        } else {
                            (true, format!("{pit}\n{message}"))
                        }
                    }
                    None => (false, "game is over".to_string()),
                },
                Err(e) => (false, e.to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn reset(&mut self) {
        self.state = GameState::new(self.starter);
        info!(starter = %self.starter, depth = self.depth, "new game");
    }

    /// Apply `pit` and report the final scores if that ended the game.
    fn play(&mut self, pit: Pit) -> (bool, String) {
        match apply_move(&self.state, pit) {
            Ok(next) => {
                self.state = next;
                let terminal = is_terminal(&self.state);
                if !terminal.end {
                    return (true, String::new());
                }
                info!(
                    allied = terminal.allied,
                    adversary = terminal.adversary,
                    "game completed"
                );
                self.reset();
                (
                    true,
                    format!(
                        "game over\nallied: {}\nadversary: {}",
                        terminal.allied, terminal.adversary
                    ),
                )
            }
            Err(e) => {
                warn!(pit, turn = %self.state.turn, "rejected move: {e}");
                (false, "invalid turn".to_string())
            }
        }
    }

    fn set_board(&mut self, args: &[&str]) -> (bool, String) {
        if args.len() != BOARD_LEN + 1 {
            return (
                false,
                format!("expected {BOARD_LEN} counts and a side to move"),
            );
        }
        let mut board = [0u8; BOARD_LEN];
        for (slot, arg) in board.iter_mut().zip(args) {
            match arg.parse::<u8>() {
                Ok(count) => *slot = count,
                Err(_) => return (false, format!("invalid count: {arg}")),
            }
        }
        let turn = match args[BOARD_LEN].parse::<Side>() {
            Ok(side) => side,
            Err(e) => return (false, e),
        };
        match GameState::from_board(board, turn) {
            Ok(state) => {
                self.state = state;
                (true, String::new())
            }
            Err(e) => (false, e.to_string()),
        }
    }

    fn render(&self) -> String {
        format!("{}to move: {}\n", self.state, self.state.turn)
    }
}
