//! Full-width fixed-depth search.
//!
//! Every legal move is expanded down to the requested depth (no pruning, no
//! caching). Each side picks the child that maximizes its own score, so the
//! backed-up value is a pair of scores rather than a single minimax number.
//!
//! Leaves are either terminal positions, scored with final tallies, or
//! depth-exhausted positions, scored with [`evaluate`].

use thiserror::Error;
use tracing::debug;

use crate::state::{GameState, MoveError, Pit, Side, apply_move, evaluate, is_terminal};

/// Errors that can surface from a search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The side to move has no stones in a position that is not over.
    #[error("no legal move for the {0} side")]
    NoLegalMove(Side),
    #[error(transparent)]
    Move(#[from] MoveError),
}

/// Backed-up value of a search plus the line that achieves it.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub allied: f32,
    pub adversary: f32,
    /// Moves in play order, starting with the move for the side to move.
    pub line: Vec<Pit>,
    /// The line ends in a finished game rather than at the depth horizon.
    pub game_over: bool,
}

impl SearchResult {
    /// Score from `side`'s point of view.
    #[inline]
    pub fn score(&self, side: Side) -> f32 {
        match side {
            Side::Allied => self.allied,
            Side::Adversary => self.adversary,
        }
    }

    /// The immediate move to play, or `None` if the position is already over.
    pub fn best_move(&self) -> Option<Pit> {
        self.line.first().copied()
    }
}

/// Search `state` to `depth` plies and return the best line for the side to move.
///
/// Ties between moves keep the lowest pit index.
pub fn evaluate_best(state: &GameState, depth: u8) -> Result<SearchResult, SearchError> {
    let result = search(state, depth)?;
    debug!(
        depth,
        turn = %state.turn,
        allied = result.allied,
        adversary = result.adversary,
        line = ?result.line,
        game_over = result.game_over,
        "search finished"
    );
    Ok(result)
}

/// Convenience wrapper returning only the move to play.
pub fn best_move(state: &GameState, depth: u8) -> Result<Option<Pit>, SearchError> {
    Ok(evaluate_best(state, depth)?.best_move())
}

fn search(state: &GameState, depth: u8) -> Result<SearchResult, SearchError> {
    let terminal = is_terminal(state);
    if terminal.end {
        return Ok(SearchResult {
            allied: terminal.allied,
            adversary: terminal.adversary,
            line: Vec::new(),
            game_over: true,
        });
    }

    if depth == 0 {
        let (allied, adversary) = evaluate(state);
        return Ok(SearchResult {
            allied,
            adversary,
            line: Vec::new(),
            game_over: false,
        });
    }

    let mover = state.turn;
    let mut best: Option<(Pit, SearchResult)> = None;
    for pit in state.legal_moves() {
        let child = apply_move(state, pit)?;
        let result = search(&child, depth - 1)?;
        let better = match &best {
            None => true,
            Some((_, current)) => result.score(mover) > current.score(mover),
        };
        if better {
            best = Some((pit, result));
        }
    }

    let (pit, mut result) = best.ok_or(SearchError::NoLegalMove(mover))?;
    result.line.insert(0, pit);
    Ok(result)
}
