//! Constants for board dimensions, game length, evaluation and search.
//!
//! This module contains all the tuning knobs of the agent. The grid extent
//! here is the standard instance; [`Board::new`](crate::board::Board::new)
//! accepts any other extent.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of rows (letter axis in the protocol).
pub const HEIGHT: i32 = 9;

/// Number of columns (digit axis in the protocol).
pub const WIDTH: i32 = 12;

/// Number of house cells announced during setup.
pub const HOUSE_COUNT: usize = 13;

/// Maximum number of half-moves in a game.
pub const MAX_STEPS: u32 = 300;

// =============================================================================
// Piece Identity
// =============================================================================

/// Size of the dense piece id space (8 slots per side, two of them unused).
pub const PIECE_ID_SPACE: usize = 16;

/// Slots per owner in the id space.
pub const SLOTS_PER_OWNER: u8 = 8;

// =============================================================================
// Evaluation Weights
// =============================================================================

/// Bonus for one of our pieces standing on a house.
pub const ARRIVED_BONUS: i32 = 1000;

/// Penalty for an opponent piece standing on a house.
pub const ARRIVED_PENALTY: i32 = 500;

/// Base weight for our undeveloped pieces, indexed by [`PieceKind::index`](crate::piece::PieceKind::index).
/// Order: Clown, Strongman, Acrobat, Magician, Trainer.
pub const OWN_KIND_WEIGHT: [i32; 5] = [-30, -20, -20, -10, 0];

/// Base weight for opponent undeveloped pieces (same order).
pub const OPPONENT_KIND_WEIGHT: [i32; 5] = [20, 15, 15, 10, 0];

/// Weight for a piece standing in the opposing trainer's zone (same order).
pub const ZONE_WEIGHT: [i32; 5] = [8, 6, 6, 10, 0];

/// Score per column of forward progress.
pub const PROGRESS_WEIGHT: i32 = 3;

/// Score per step of Manhattan distance to the nearest free house.
pub const HOUSE_DISTANCE_WEIGHT: i32 = 4;

// =============================================================================
// Search Parameters
// =============================================================================

/// Rough number of states a single search may visit; depth is derived from it.
pub const SEARCH_BUDGET: u64 = 2500;

/// Moves scoring further than this from the best shallow score are pruned.
pub const PRUNE_MARGIN: i32 = 30;

/// Upper bound on the derived search depth.
pub const MAX_DEPTH: u32 = 3;

/// Manhattan distance to a free house under which a piece counts as "near".
pub const NEAR_HOUSE: i32 = 2;

// =============================================================================
// Neighbor Offsets
// =============================================================================

/// The 8 one-step offsets as (row, col).
pub const STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The 8 two-step offsets (straight and diagonal) used by the acrobat.
pub const LEAPS: [(i32, i32); 8] = [
    (-2, -2),
    (-2, 0),
    (-2, 2),
    (0, -2),
    (0, 2),
    (2, -2),
    (2, 0),
    (2, 2),
];
