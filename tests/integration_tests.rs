//! Integration tests for mancala-solver
//!
//! These drive the public API the way a game front end would: build a
//! position, apply moves, and ask the search for the best line.

use mancala_solver::constants::{BOARD_LEN, LEAF_PIT_WEIGHT};
use mancala_solver::search::evaluate_best;
use mancala_solver::state::{
    GameState, MoveError, Side, apply_move, evaluate, is_terminal, opposite_pit,
};

// =============================================================================
// Helper functions
// =============================================================================

fn position(board: [u8; BOARD_LEN], turn: Side) -> GameState {
    GameState::from_board(board, turn).expect("board within counter range")
}

/// Play random legal moves from the opening until the game ends,
/// calling `check` with every (before, pit, after) transition.
fn random_game(seed: u64, mut check: impl FnMut(&GameState, usize, &GameState)) -> GameState {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut state = GameState::new(if rng.bool() { Side::Allied } else { Side::Adversary });
    while !is_terminal(&state).end {
        let moves: Vec<usize> = state.legal_moves().collect();
        let pit = moves[rng.usize(..moves.len())];
        let next = apply_move(&state, pit).expect("legal move");
        check(&state, pit, &next);
        state = next;
    }
    state
}

// =============================================================================
// State engine
// =============================================================================

#[test]
fn test_conservation_over_random_games() {
    for seed in 0..50 {
        random_game(seed, |before, _, after| {
            assert_eq!(before.total_stones(), after.total_stones());
            assert_eq!(after.total_stones(), 48);
        });
    }
}

#[test]
fn test_opponent_store_never_grows() {
    for seed in 0..50 {
        random_game(seed, |before, _, after| {
            let opponent = before.turn.opponent();
            assert_eq!(before.store(opponent), after.store(opponent));
            assert!(after.store(before.turn) >= before.store(before.turn));
        });
    }
}

#[test]
fn test_turn_kept_only_on_store_landing() {
    for seed in 0..30 {
        random_game(seed, |before, pit, after| {
            let mover = before.turn;
            let stones = before.board[pit] as usize;
            // Distance to the mover's store along the sowing path (opponent store skipped).
            let to_store = (mover.store() + BOARD_LEN - pit) % BOARD_LEN;
            let lands_in_store = stones % (BOARD_LEN - 1) == to_store;
            assert_eq!(after.turn == mover, lands_in_store);
        });
    }
}

#[test]
fn test_rejected_moves_leave_state_untouched() {
    let state = GameState::new(Side::Allied);
    let snapshot = state;

    for pit in 6..BOARD_LEN + 2 {
        assert!(apply_move(&state, pit).is_err());
    }
    assert_eq!(state, snapshot);

    let state = position([0, 1, 4, 4, 4, 4, 3, 4, 4, 4, 4, 4, 4, 2], Side::Allied);
    assert_eq!(apply_move(&state, 0), Err(MoveError::EmptyPit { pit: 0 }));
    assert_eq!(
        apply_move(&state, 7),
        Err(MoveError::NotYourPit { pit: 7, side: Side::Allied })
    );
    assert_eq!(state.board, [0, 1, 4, 4, 4, 4, 3, 4, 4, 4, 4, 4, 4, 2]);
}

#[test]
fn test_opening_scenario() {
    let state = position([4, 4, 4, 4, 4, 4, 0, 4, 4, 4, 4, 4, 4, 0], Side::Allied);
    let next = apply_move(&state, 2).unwrap();
    assert_eq!(next.board, [4, 4, 0, 5, 5, 5, 1, 4, 4, 4, 4, 4, 4, 0]);
    assert_eq!(next.turn, Side::Allied);
}

#[test]
fn test_landing_on_occupied_pit_does_not_capture() {
    let state = position([0, 1, 4, 4, 4, 4, 3, 4, 4, 4, 4, 4, 4, 2], Side::Allied);
    let next = apply_move(&state, 1).unwrap();
    assert_eq!(next.board[2], 5);
    assert_eq!(next.board[10], 4);
    assert_eq!(next.board[6], 3);
    assert_eq!(next.turn, Side::Adversary);
}

#[test]
fn test_capture_moves_opposite_plus_one() {
    let state = position([2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 7, 1, 0], Side::Allied);
    // Pit 0 sows into 1 and 2; pit 2 was empty and faces pit 10 (empty): no capture.
    let next = apply_move(&state, 0).unwrap();
    assert_eq!(next.board, [0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 7, 1, 0]);
    assert_eq!(next.turn, Side::Adversary);

    let state = position([0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 7, 1, 0], Side::Allied);
    // Pit 1 lands in empty pit 2 facing pit 10 (empty): still no capture.
    let next = apply_move(&state, 1).unwrap();
    assert_eq!(next.board[2], 1);

    let state = position([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 7, 1, 0], Side::Allied);
    // Pit 0 lands in empty pit 1 facing pit 11 (7 stones): capture 8.
    let next = apply_move(&state, 0).unwrap();
    assert_eq!(opposite_pit(1), Some(11));
    assert_eq!(next.board, [0, 0, 0, 0, 0, 0, 8, 0, 0, 0, 0, 0, 1, 0]);
    assert_eq!(next.turn, Side::Adversary);
    assert!(is_terminal(&next).end);
}

// =============================================================================
// Terminal test and evaluation
// =============================================================================

#[test]
fn test_terminal_scoring_credits_remaining_pits() {
    let state = position([3, 0, 2, 0, 0, 1, 18, 0, 0, 0, 0, 0, 0, 24], Side::Adversary);
    let terminal = is_terminal(&state);
    assert!(terminal.end);
    assert_eq!(terminal.allied, 24.0);
    assert_eq!(terminal.adversary, 24.0);
}

#[test]
fn test_random_games_end_with_all_stones_counted() {
    for seed in 0..20 {
        let end = random_game(seed, |_, _, _| {});
        let terminal = is_terminal(&end);
        assert!(terminal.end);
        assert_eq!(terminal.allied + terminal.adversary, 48.0);
    }
}

#[test]
fn test_depth_zero_matches_leaf_formula() {
    let state = position([1, 2, 3, 4, 5, 6, 3, 6, 5, 4, 3, 2, 1, 3], Side::Allied);
    let result = evaluate_best(&state, 0).unwrap();
    assert_eq!(result.allied, 3.0 + LEAF_PIT_WEIGHT * 21.0);
    assert_eq!(result.adversary, 3.0 + LEAF_PIT_WEIGHT * 21.0);
    assert_eq!((result.allied, result.adversary), evaluate(&state));
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_search_is_deterministic() {
    let state = GameState::new(Side::Allied);
    let first = evaluate_best(&state, 5).unwrap();
    let second = evaluate_best(&state, 5).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_best_line_replays_to_its_score() {
    let mut rng = fastrand::Rng::with_seed(11);
    for _ in 0..10 {
        // Walk a few random plies into a game to get varied positions.
        let mut state = GameState::new(Side::Allied);
        for _ in 0..rng.usize(0..8) {
            if is_terminal(&state).end {
                break;
            }
            let moves: Vec<usize> = state.legal_moves().collect();
            state = apply_move(&state, moves[rng.usize(..moves.len())]).unwrap();
        }

        let depth = 4;
        let result = evaluate_best(&state, depth).unwrap();
        let mut leaf = state;
        for &pit in &result.line {
            leaf = apply_move(&leaf, pit).expect("line is playable");
        }

        if result.game_over {
            let terminal = is_terminal(&leaf);
            assert!(terminal.end);
            assert_eq!((terminal.allied, terminal.adversary), (result.allied, result.adversary));
        } else {
            assert_eq!(result.line.len(), depth as usize);
            assert_eq!(evaluate(&leaf), (result.allied, result.adversary));
        }
    }
}

#[test]
fn test_best_move_is_not_worse_than_siblings() {
    let state = GameState::new(Side::Adversary);
    let depth = 3;
    let result = evaluate_best(&state, depth).unwrap();
    let best = result.best_move().unwrap();
    for pit in state.legal_moves() {
        let child = apply_move(&state, pit).unwrap();
        let sibling = evaluate_best(&child, depth - 1).unwrap();
        assert!(sibling.adversary <= result.adversary);
        if pit < best {
            assert!(sibling.adversary < result.adversary);
        }
    }
}

#[test]
fn test_default_depth_search_from_opening() {
    let state = GameState::new(Side::Allied);
    let result = evaluate_best(&state, mancala_solver::constants::DEFAULT_DEPTH).unwrap();
    assert!(!result.line.is_empty());
    assert!(Side::Allied.owns(result.line[0]));
}
