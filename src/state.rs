//! Mancala position representation and move execution.
//!
//! This module provides the state-transition rules for Kalah:
//! - Board state as a flat array of 14 stone counters
//! - Sowing with wrap-around that skips the opponent's store
//! - Extra turns when the last stone lands in the mover's store
//! - Captures when the last stone lands in an empty pit on the mover's side
//!
//! Every transition returns a fresh [`GameState`]; the input is never mutated,
//! so sibling branches of a search can share the same parent.

use std::fmt;
use std::ops::Range;

use thiserror::Error;

use crate::constants::{
    ADVERSARY_FIRST_PIT, ADVERSARY_STORE, ALLIED_STORE, BOARD_LEN, INITIAL_BOARD,
    LEAF_PIT_WEIGHT, OPPOSITE_SUM, PITS_PER_SIDE,
};

/// A pit on the board, as an absolute index in `0..14`.
pub type Pit = usize;

/// The two sides of the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Owns pits 0-5 and the store at 6.
    Allied,
    /// Owns pits 7-12 and the store at 13.
    Adversary,
}

impl Side {
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Allied => Side::Adversary,
            Side::Adversary => Side::Allied,
        }
    }

    /// Index of this side's store.
    #[inline]
    pub fn store(self) -> Pit {
        match self {
            Side::Allied => ALLIED_STORE,
            Side::Adversary => ADVERSARY_STORE,
        }
    }

    /// The six playing pits owned by this side, in sowing order.
    #[inline]
    pub fn pits(self) -> Range<Pit> {
        match self {
            Side::Allied => 0..ALLIED_STORE,
            Side::Adversary => ADVERSARY_FIRST_PIT..ADVERSARY_STORE,
        }
    }

    /// Whether `pit` is one of this side's playing pits (stores excluded).
    #[inline]
    pub fn owns(self, pit: Pit) -> bool {
        self.pits().contains(&pit)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Allied => write!(f, "allied"),
            Side::Adversary => write!(f, "adversary"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "allied" | "ally" => Ok(Side::Allied),
            "adversary" | "adv" => Ok(Side::Adversary),
            other => Err(format!("unknown side: {other}")),
        }
    }
}

/// Reasons a move is rejected. All of them leave the caller's state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("invalid move: pit {pit} is off the board")]
    OutOfRange { pit: Pit },
    #[error("invalid move: pit {pit} does not belong to the {side} side")]
    NotYourPit { pit: Pit, side: Side },
    #[error("invalid move: pit {pit} is empty")]
    EmptyPit { pit: Pit },
}

/// Reasons an arbitrary board is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board holds {total} stones, more than a pit counter can hold")]
    TooManyStones { total: u32 },
}

/// Result of the end-of-game test.
///
/// The scores are the final tallies if `end` is set: each side's store plus
/// whatever is left in its own playing pits.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Terminal {
    pub end: bool,
    pub allied: f32,
    pub adversary: f32,
}

/// A Mancala position: the 14 counters plus the side to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    pub board: [u8; BOARD_LEN],
    pub turn: Side,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Side::Allied)
    }
}

impl GameState {
    /// Standard opening position: four stones in every playing pit.
    pub fn new(turn: Side) -> Self {
        GameState {
            board: INITIAL_BOARD,
            turn,
        }
    }

    /// Build a position from raw counters.
    ///
    /// The total is capped at `u8::MAX` so that no sequence of moves can
    /// overflow a single counter.
    pub fn from_board(board: [u8; BOARD_LEN], turn: Side) -> Result<Self, BoardError> {
        let total: u32 = board.iter().map(|&s| s as u32).sum();
        if total > u8::MAX as u32 {
            return Err(BoardError::TooManyStones { total });
        }
        Ok(GameState { board, turn })
    }

    /// Stones currently in `side`'s playing pits.
    pub fn pit_sum(&self, side: Side) -> u32 {
        self.board[side.pits()].iter().map(|&s| s as u32).sum()
    }

    /// Stones banked in `side`'s store.
    #[inline]
    pub fn store(&self, side: Side) -> u8 {
        self.board[side.store()]
    }

    pub fn total_stones(&self) -> u32 {
        self.board.iter().map(|&s| s as u32).sum()
    }

    /// Non-empty pits of the side to move, lowest index first.
    pub fn legal_moves(&self) -> impl Iterator<Item = Pit> + '_ {
        self.turn.pits().filter(move |&p| self.board[p] != 0)
    }
}

/// The pit across the board from `pit`, or `None` for stores.
#[inline]
pub fn opposite_pit(pit: Pit) -> Option<Pit> {
    if pit < OPPOSITE_SUM && pit != ALLIED_STORE {
        Some(OPPOSITE_SUM - pit)
    } else {
        None
    }
}

/// Apply one move for the side to move and return the resulting position.
///
/// # Errors
/// - [`MoveError::OutOfRange`] if `pit` is not a board index
/// - [`MoveError::NotYourPit`] if `pit` is a store or an opponent's pit
/// - [`MoveError::EmptyPit`] if the pit holds no stones
pub fn apply_move(state: &GameState, pit: Pit) -> Result<GameState, MoveError> {
    let mover = state.turn;
    if pit >= BOARD_LEN {
        return Err(MoveError::OutOfRange { pit });
    }
    if !mover.owns(pit) {
        return Err(MoveError::NotYourPit { pit, side: mover });
    }
    let stones = state.board[pit];
    if stones == 0 {
        return Err(MoveError::EmptyPit { pit });
    }

    let mut next = *state;
    next.board[pit] = 0;

    // Sow, skipping the opponent's store.
    let skip = mover.opponent().store();
    let mut current = pit;
    for _ in 0..stones {
        current = (current + 1) % BOARD_LEN;
        if current == skip {
            current = (current + 1) % BOARD_LEN;
        }
        next.board[current] += 1;
    }

    if current == mover.store() {
        // Extra turn: the mover plays again.
        return Ok(next);
    }

    if mover.owns(current) && next.board[current] == 1 {
        if let Some(opp) = opposite_pit(current) {
            let stolen = next.board[opp];
            if stolen >= 1 {
                next.board[mover.store()] += stolen + 1;
                next.board[current] = 0;
                next.board[opp] = 0;
            }
        }
    }

    next.turn = mover.opponent();
    Ok(next)
}

/// Check whether the game is over.
///
/// The game ends as soon as either side's playing pits are all empty.
pub fn is_terminal(state: &GameState) -> Terminal {
    let allied_pits = state.pit_sum(Side::Allied);
    let adversary_pits = state.pit_sum(Side::Adversary);
    Terminal {
        end: allied_pits.min(adversary_pits) == 0,
        allied: (allied_pits + state.store(Side::Allied) as u32) as f32,
        adversary: (adversary_pits + state.store(Side::Adversary) as u32) as f32,
    }
}

/// Static evaluation used at depth-exhausted leaves.
///
/// Returns `(allied, adversary)`, each `store + 0.85 * own pit sum`.
pub fn evaluate(state: &GameState) -> (f32, f32) {
    let score = |side: Side| {
        state.store(side) as f32 + LEAF_PIT_WEIGHT * state.pit_sum(side) as f32
    };
    (score(Side::Allied), score(Side::Adversary))
}

impl fmt::Display for GameState {
    /// Adversary row (store first) on top, allied row (store last) indented below.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pit in (ALLIED_STORE + 1..BOARD_LEN).rev() {
            write!(f, "{:>2} ", self.board[pit])?;
        }
        writeln!(f)?;
        write!(f, "   ")?;
        for pit in 0..=PITS_PER_SIDE {
            write!(f, "{:>2} ", self.board[pit])?;
        }
        writeln!(f)
    }
}
