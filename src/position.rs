//! Position representation and move execution.
//!
//! A [`Position`] is the board plus the side to move and, while a multi-jump
//! is in progress, the square of the piece that must keep jumping. All rule
//! checks for a single move live in [`Position::try_move`]:
//! - shape (one diagonal step or one diagonal jump)
//! - direction (men only move toward the opponent, kings anywhere)
//! - occupancy of the landing square and the jumped square
//! - promotion on the far row, applied before looking for further jumps
//!
//! A rejected move never touches the position.

use std::fmt;

use log::{debug, trace};

use crate::board::{Board, Cell, Coord, Piece, Rank, Side};
use crate::constants::{BLACK_CROWN_ROW, N, RED_CROWN_ROW};
use crate::movegen::can_capture;

/// Reason a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// A coordinate is off the board
    OutOfBounds(Coord),
    /// No piece on the source square
    EmptySource,
    /// The piece belongs to the side not on move
    NotYourTurn,
    /// A multi-jump must be continued by the piece on this square
    ChainPending(Coord),
    /// Not a single diagonal step or jump in a permitted direction
    IllegalShape,
    /// Destination square is not empty
    Occupied,
    /// A jump that does not pass over an opponent piece
    NoJumpedPiece,
    /// The game has already been decided
    GameOver,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfBounds((r, c)) => write!(f, "illegal move: ({r},{c}) is off the board"),
            MoveError::EmptySource => write!(f, "illegal move: no piece on source square"),
            MoveError::NotYourTurn => write!(f, "illegal move: not your piece"),
            MoveError::ChainPending((r, c)) => {
                write!(f, "illegal move: piece at ({r},{c}) must continue jumping")
            }
            MoveError::IllegalShape => write!(f, "illegal move: not a diagonal step or jump"),
            MoveError::Occupied => write!(f, "illegal move: destination not empty"),
            MoveError::NoJumpedPiece => write!(f, "illegal move: no opponent piece to jump"),
            MoveError::GameOver => write!(f, "illegal move: game is over"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Result of a successfully applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub from: Coord,
    pub to: Coord,
    /// Square of the piece removed by a jump
    pub captured: Option<Coord>,
    /// The moving man was crowned on landing
    pub promoted: bool,
    /// The same piece has another jump; the turn did not pass
    pub chain_pending: bool,
}

impl MoveOutcome {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn turn_switched(&self) -> bool {
        !self.chain_pending
    }
}

/// A checkers position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    /// Side to move
    pub turn: Side,
    /// Square of a piece in the middle of a multi-jump
    pub pending_chain: Option<Coord>,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// Row on which a man of `side` is crowned.
pub fn crown_row(side: Side) -> usize {
    match side {
        Side::Red => RED_CROWN_ROW,
        Side::Black => BLACK_CROWN_ROW,
    }
}

impl Position {
    /// The starting position, red to move.
    pub fn new() -> Self {
        Self::from_board(Board::initial(), Side::Red)
    }

    pub fn from_board(board: Board, turn: Side) -> Self {
        Self {
            board,
            turn,
            pending_chain: None,
        }
    }

    /// Back to the starting position.
    pub fn reset(&mut self) {
        self.board.initialize();
        self.turn = Side::Red;
        self.pending_chain = None;
    }

    /// Validate and apply the move `from` -> `to` for the side to move.
    ///
    /// On a jump the captured piece is removed and, if the moved piece (with
    /// its rank after any promotion) can jump again, the turn stays with the
    /// mover and [`Position::pending_chain`] points at the landing square.
    /// Otherwise the turn passes to the opponent.
    ///
    /// # Errors
    /// Returns a [`MoveError`] describing the first rule the move breaks. The
    /// position is unchanged in that case.
    pub fn try_move(&mut self, from: Coord, to: Coord) -> Result<MoveOutcome, MoveError> {
        let result = self.check_move(from, to);
        match result {
            Ok((piece, captured)) => Ok(self.apply(from, to, piece, captured)),
            Err(e) => {
                trace!("rejected {from:?} -> {to:?}: {e}");
                Err(e)
            }
        }
    }

    /// Check a move without applying it. Returns the moving piece and the
    /// square of the piece it would capture.
    fn check_move(&self, from: Coord, to: Coord) -> Result<(Piece, Option<Coord>), MoveError> {
        for c in [from, to] {
            if c.0 >= N || c.1 >= N {
                return Err(MoveError::OutOfBounds(c));
            }
        }

        let piece = self.board.get(from).piece().ok_or(MoveError::EmptySource)?;
        if piece.side != self.turn {
            return Err(MoveError::NotYourTurn);
        }
        if let Some(chain) = self.pending_chain {
            if from != chain {
                return Err(MoveError::ChainPending(chain));
            }
        }

        let row_diff = to.0 as isize - from.0 as isize;
        let col_diff = to.1 as isize - from.1 as isize;
        let forward_ok = piece.is_king() || row_diff.signum() == piece.side.forward();
        if row_diff.abs() != col_diff.abs() || !forward_ok {
            return Err(MoveError::IllegalShape);
        }

        match col_diff.abs() {
            1 => {
                if let Some(chain) = self.pending_chain {
                    return Err(MoveError::ChainPending(chain));
                }
                if !self.board.get(to).is_empty() {
                    return Err(MoveError::Occupied);
                }
                Ok((piece, None))
            }
            2 => {
                let jumped = ((from.0 + to.0) / 2, (from.1 + to.1) / 2);
                if !self.board.get(jumped).is_side(piece.side.opponent()) {
                    return Err(MoveError::NoJumpedPiece);
                }
                if !self.board.get(to).is_empty() {
                    return Err(MoveError::Occupied);
                }
                Ok((piece, Some(jumped)))
            }
            _ => Err(MoveError::IllegalShape),
        }
    }

    fn apply(&mut self, from: Coord, to: Coord, piece: Piece, captured: Option<Coord>) -> MoveOutcome {
        let promoted = piece.rank == Rank::Man && to.0 == crown_row(piece.side);
        let landed = if promoted {
            Piece::king(piece.side)
        } else {
            piece
        };

        self.board.set(from, Cell::Empty);
        self.board.set(to, Cell::Occupied(landed));
        if let Some(jumped) = captured {
            self.board.set(jumped, Cell::Empty);
        }

        // Promotion is already applied, so a freshly crowned king continues
        // with king directions.
        let chain_pending = captured.is_some() && can_capture(&self.board, to, landed);
        if chain_pending {
            self.pending_chain = Some(to);
        } else {
            self.pending_chain = None;
            self.turn = self.turn.opponent();
        }

        debug!(
            "{} {from:?} -> {to:?}{}{}{}",
            piece.side,
            captured.map(|c| format!(" x{c:?}")).unwrap_or_default(),
            if promoted { " (crowned)" } else { "" },
            if chain_pending { " (chain)" } else { "" },
        );

        MoveOutcome {
            from,
            to,
            captured,
            promoted,
            chain_pending,
        }
    }
}
