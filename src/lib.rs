//! Mancala-Solver: adversarial lookup for Kalah.
//!
//! This crate models six-pit Kalah and finds the best line for the side to
//! move with a plain full-width search to a fixed depth.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, seeding, and search parameters
//! - [`state`] - Game state and the move rule (sowing, extra turns, captures)
//! - [`search`] - Exhaustive fixed-depth search returning scores and best line
//! - [`session`] - Line-oriented command session for following a live game
//!
//! ## Example
//!
//! ```
//! use mancala_solver::state::{GameState, Side, apply_move};
//! use mancala_solver::search::evaluate_best;
//!
//! // Standard opening, allied side to move
//! let state = GameState::new(Side::Allied);
//!
//! // Pit 2 ends in the allied store, so allied moves again
//! let next = apply_move(&state, 2).unwrap();
//! assert_eq!(next.turn, Side::Allied);
//!
//! // Look four plies ahead
//! let result = evaluate_best(&next, 4).unwrap();
//! println!("Best line: {:?}", result.line);
//! ```

pub mod constants;
pub mod search;
pub mod session;
pub mod state;
