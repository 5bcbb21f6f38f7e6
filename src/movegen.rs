//! Move generation for a single piece and side-wide move queries.
//!
//! Destinations come from the direction table in [`Piece::directions`]:
//! - a step to `coord + d` when that square is empty
//! - a jump to `coord + 2d` when `coord + d` holds an opponent piece and the
//!   landing square is empty
//!
//! Steps and jumps are produced independently per direction. Mandatory
//! capture is not applied here; the executor decides what is actually legal.

use crate::board::{Board, Cell, Coord, Piece, Side};

/// Landing square of a jump from `from` along `dir`, if one is available.
fn jump_target(board: &Board, from: Coord, piece: Piece, dir: (isize, isize)) -> Option<Coord> {
    let over = Board::offset(from, dir, 1)?;
    let land = Board::offset(from, dir, 2)?;
    (board.get(over).is_side(piece.side.opponent()) && board.get(land).is_empty()).then_some(land)
}

/// Candidate destinations for `piece` standing at `from`.
pub fn generate_moves(board: &Board, from: Coord, piece: Piece) -> Vec<Coord> {
    let mut moves = Vec::new();
    for &dir in piece.directions() {
        if let Some(step) = Board::offset(from, dir, 1) {
            if board.get(step).is_empty() {
                moves.push(step);
            }
        }
        if let Some(land) = jump_target(board, from, piece, dir) {
            moves.push(land);
        }
    }
    moves
}

/// Jump destinations only.
pub fn capture_moves(board: &Board, from: Coord, piece: Piece) -> Vec<Coord> {
    piece
        .directions()
        .iter()
        .filter_map(|&dir| jump_target(board, from, piece, dir))
        .collect()
}

/// True if `piece` at `from` has at least one jump available.
pub fn can_capture(board: &Board, from: Coord, piece: Piece) -> bool {
    piece
        .directions()
        .iter()
        .any(|&dir| jump_target(board, from, piece, dir).is_some())
}

/// True if `side` still has a piece on the board.
pub fn has_pieces(board: &Board, side: Side) -> bool {
    board.pieces(side).next().is_some()
}

/// True if any piece of `side` has a step or a jump.
pub fn has_moves(board: &Board, side: Side) -> bool {
    board.pieces(side).any(|(from, piece)| {
        piece.directions().iter().any(|&dir| {
            Board::offset(from, dir, 1).is_some_and(|step| board.get(step) == Cell::Empty)
                || jump_target(board, from, piece, dir).is_some()
        })
    })
}
