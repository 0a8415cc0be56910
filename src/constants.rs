//! Constants for board geometry, seeding, and search parameters.
//!
//! The board is a flat array of 14 counters walked counter-clockwise:
//!
//! ```text
//!      13  12  11  10   9   8   7        <- adversary pits, adversary store at 13
//!           0   1   2   3   4   5   6    <- allied pits, allied store at 6
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of playing pits owned by each side.
pub const PITS_PER_SIDE: usize = 6;

/// Total number of counters on the board (12 pits + 2 stores).
pub const BOARD_LEN: usize = 2 * PITS_PER_SIDE + 2;

/// Index of the allied store.
pub const ALLIED_STORE: usize = PITS_PER_SIDE;

/// Index of the adversary store.
pub const ADVERSARY_STORE: usize = BOARD_LEN - 1;

/// First adversary playing pit.
pub const ADVERSARY_FIRST_PIT: usize = ALLIED_STORE + 1;

/// Sum of a pit index and its opposite (`p + opposite(p) == 12`).
pub const OPPOSITE_SUM: usize = 2 * PITS_PER_SIDE;

// =============================================================================
// Seeding
// =============================================================================

/// Stones placed in each playing pit at the start of a game.
pub const SEEDS_PER_PIT: u8 = 4;

/// Starting board for a standard game.
pub const INITIAL_BOARD: [u8; BOARD_LEN] = {
    let mut board = [SEEDS_PER_PIT; BOARD_LEN];
    board[ALLIED_STORE] = 0;
    board[ADVERSARY_STORE] = 0;
    board
};

// =============================================================================
// Search Parameters
// =============================================================================

/// Default search depth in plies.
pub const DEFAULT_DEPTH: u8 = 6;

/// Weight applied to stones still sitting in a side's playing pits at a leaf.
/// Banked stones count fully; unbanked ones are discounted.
pub const LEAF_PIT_WEIGHT: f32 = 0.85;
