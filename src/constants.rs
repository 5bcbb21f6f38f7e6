//! Board geometry and cell symbols.
//!
//! Checkers is always played on an 8x8 board here, so unlike engines that
//! support several sizes the geometry is fixed at compile time.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 8;

/// Number of rows each side fills at the start of the game.
pub const HOME_ROWS: usize = 3;

/// Pieces per side in the starting layout.
pub const PIECES_PER_SIDE: usize = HOME_ROWS * N / 2;

/// Row a red man must reach to be crowned (red moves toward higher rows).
pub const RED_CROWN_ROW: usize = N - 1;

/// Row a black man must reach to be crowned.
pub const BLACK_CROWN_ROW: usize = 0;

// =============================================================================
// Diagonal Offsets
// =============================================================================

/// Forward diagonals for red men (down the board).
pub const RED_MAN_DIRS: [(isize, isize); 2] = [(1, -1), (1, 1)];

/// Forward diagonals for black men (up the board).
pub const BLACK_MAN_DIRS: [(isize, isize); 2] = [(-1, -1), (-1, 1)];

/// All four diagonals, used by kings of either side.
pub const KING_DIRS: [(isize, isize); 4] = [(1, -1), (1, 1), (-1, -1), (-1, 1)];

// =============================================================================
// Cell Symbols (text diagrams)
// =============================================================================

pub const EMPTY: char = '.';
pub const RED_MAN: char = 'r';
pub const RED_KING: char = 'R';
pub const BLACK_MAN: char = 'b';
pub const BLACK_KING: char = 'B';
