//! Board model: cell storage, bounds checks and the starting layout.
//!
//! The board is a plain 8x8 grid of [`Cell`] values indexed by `(row, col)`.
//! Row 0 is red's home edge, row 7 is black's. Pieces only ever start on dark
//! squares (`(row + col)` odd); nothing stops a caller from placing one
//! elsewhere afterwards.

use std::fmt;
use std::str::FromStr;

use crate::constants::{
    BLACK_KING, BLACK_MAN, BLACK_MAN_DIRS, EMPTY, HOME_ROWS, KING_DIRS, N, RED_KING, RED_MAN,
    RED_MAN_DIRS,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// Row delta of a forward step for a man of this side.
    pub fn forward(self) -> isize {
        match self {
            Side::Red => 1,
            Side::Black => -1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Red => write!(f, "red"),
            Side::Black => write!(f, "black"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rank {
    Man,
    King,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub rank: Rank,
}

impl Piece {
    pub const fn man(side: Side) -> Self {
        Self {
            side,
            rank: Rank::Man,
        }
    }

    pub const fn king(side: Side) -> Self {
        Self {
            side,
            rank: Rank::King,
        }
    }

    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }

    /// Diagonal directions this piece may move and capture in.
    ///
    /// This is the single direction table shared by move generation, chain
    /// capture detection and the has-moves check.
    pub fn directions(self) -> &'static [(isize, isize)] {
        match (self.side, self.rank) {
            (_, Rank::King) => &KING_DIRS,
            (Side::Red, Rank::Man) => &RED_MAN_DIRS,
            (Side::Black, Rank::Man) => &BLACK_MAN_DIRS,
        }
    }

    pub fn symbol(self) -> char {
        match (self.side, self.rank) {
            (Side::Red, Rank::Man) => RED_MAN,
            (Side::Red, Rank::King) => RED_KING,
            (Side::Black, Rank::Man) => BLACK_MAN,
            (Side::Black, Rank::King) => BLACK_KING,
        }
    }
}

/// Contents of one board cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Piece),
}

impl Cell {
    pub const RED_MAN: Cell = Cell::Occupied(Piece::man(Side::Red));
    pub const RED_KING: Cell = Cell::Occupied(Piece::king(Side::Red));
    pub const BLACK_MAN: Cell = Cell::Occupied(Piece::man(Side::Black));
    pub const BLACK_KING: Cell = Cell::Occupied(Piece::king(Side::Black));

    pub fn piece(self) -> Option<Piece> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(p) => Some(p),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// True if this cell holds a piece belonging to `side`.
    pub fn is_side(self, side: Side) -> bool {
        matches!(self, Cell::Occupied(p) if p.side == side)
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => EMPTY,
            Cell::Occupied(p) => p.symbol(),
        }
    }

    pub fn from_symbol(c: char) -> Option<Cell> {
        match c {
            EMPTY => Some(Cell::Empty),
            RED_MAN => Some(Cell::RED_MAN),
            RED_KING => Some(Cell::RED_KING),
            BLACK_MAN => Some(Cell::BLACK_MAN),
            BLACK_KING => Some(Cell::BLACK_KING),
            _ => None,
        }
    }
}

/// A board coordinate as `(row, col)`.
pub type Coord = (usize, usize);

/// True iff `(row, col)` lies on the board.
#[inline]
pub fn in_bounds(row: isize, col: isize) -> bool {
    (0..N as isize).contains(&row) && (0..N as isize).contains(&col)
}

/// True for the playable dark squares.
#[inline]
pub fn is_dark(coord: Coord) -> bool {
    (coord.0 + coord.1) % 2 == 1
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; N]; N],
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; N]; N],
        }
    }

    /// The standard starting layout.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        board.initialize();
        board
    }

    /// Reset to the starting layout: red men on the dark squares of rows
    /// 0-2, black men on the dark squares of rows 5-7.
    pub fn initialize(&mut self) {
        for row in 0..N {
            for col in 0..N {
                self.cells[row][col] = if !is_dark((row, col)) {
                    Cell::Empty
                } else if row < HOME_ROWS {
                    Cell::RED_MAN
                } else if row >= N - HOME_ROWS {
                    Cell::BLACK_MAN
                } else {
                    Cell::Empty
                };
            }
        }
    }

    /// Cell at `coord`. Off-board coordinates read as empty.
    pub fn get(&self, (row, col): Coord) -> Cell {
        if row >= N || col >= N {
            return Cell::Empty;
        }
        self.cells[row][col]
    }

    /// Write `cell` at `coord`. Off-board writes are dropped.
    pub fn set(&mut self, (row, col): Coord, cell: Cell) {
        debug_assert!(row < N && col < N, "set out of bounds: ({row}, {col})");
        if row < N && col < N {
            self.cells[row][col] = cell;
        }
    }

    /// The square `steps` diagonal steps from `coord` along `(dr, dc)`, if it
    /// is on the board.
    pub fn offset(coord: Coord, (dr, dc): (isize, isize), steps: isize) -> Option<Coord> {
        let row = coord.0 as isize + dr * steps;
        let col = coord.1 as isize + dc * steps;
        in_bounds(row, col).then(|| (row as usize, col as usize))
    }

    /// All occupied cells of `side`, in row-major order.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        (0..N)
            .flat_map(|row| (0..N).map(move |col| (row, col)))
            .filter_map(move |coord| match self.get(coord) {
                Cell::Occupied(p) if p.side == side => Some((coord, p)),
                _ => None,
            })
    }

    pub fn count(&self, side: Side) -> usize {
        self.pieces(side).count()
    }
}

/// Error from parsing a board diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    /// Wrong number of non-blank lines
    Rows(usize),
    /// A row with the wrong number of cells
    Columns { row: usize, found: usize },
    /// Unrecognised cell character
    Symbol { row: usize, col: usize, symbol: char },
}

impl fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseBoardError::Rows(found) => write!(f, "expected {N} rows, found {found}"),
            ParseBoardError::Columns { row, found } => {
                write!(f, "row {row}: expected {N} cells, found {found}")
            }
            ParseBoardError::Symbol { row, col, symbol } => {
                write!(f, "row {row} col {col}: unknown symbol '{symbol}'")
            }
        }
    }
}

impl std::error::Error for ParseBoardError {}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parse a diagram in the same format [`fmt::Display`] produces: one line
    /// per row, row 0 first, cells optionally separated by whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if rows.len() != N {
            return Err(ParseBoardError::Rows(rows.len()));
        }

        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != N {
                return Err(ParseBoardError::Columns {
                    row,
                    found: symbols.len(),
                });
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                let cell =
                    Cell::from_symbol(symbol).ok_or(ParseBoardError::Symbol { row, col, symbol })?;
                board.cells[row][col] = cell;
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PIECES_PER_SIDE;

    #[test]
    fn test_initial_layout() {
        let board = Board::initial();
        assert_eq!(board.count(Side::Red), PIECES_PER_SIDE);
        assert_eq!(board.count(Side::Black), PIECES_PER_SIDE);
        assert_eq!(board.get((2, 1)), Cell::RED_MAN);
        assert_eq!(board.get((5, 0)), Cell::BLACK_MAN);
        assert_eq!(board.get((3, 0)), Cell::Empty);
        assert_eq!(board.get((0, 0)), Cell::Empty);
    }

    #[test]
    fn test_in_bounds() {
        assert!(in_bounds(0, 0));
        assert!(in_bounds(7, 7));
        assert!(!in_bounds(-1, 3));
        assert!(!in_bounds(3, 8));
        assert!(!in_bounds(8, 0));
    }

    #[test]
    fn test_offset() {
        assert_eq!(Board::offset((2, 1), (1, 1), 1), Some((3, 2)));
        assert_eq!(Board::offset((2, 1), (1, -1), 2), None);
        assert_eq!(Board::offset((7, 6), (1, 1), 1), None);
    }

    #[test]
    fn test_get_out_of_bounds_is_empty() {
        let board = Board::initial();
        assert_eq!(board.get((8, 1)), Cell::Empty);
        assert_eq!(board.get((1, 42)), Cell::Empty);
    }

    #[test]
    fn test_display_parse_roundtrip() {
        let board = Board::initial();
        let text = board.to_string();
        assert_eq!(text.lines().next(), Some(". r . r . r . r"));
        assert_eq!(text.parse::<Board>(), Ok(board));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("r . .".parse::<Board>(), Err(ParseBoardError::Rows(1)));

        let short_row = "........\n".repeat(7) + ".......";
        assert_eq!(
            short_row.parse::<Board>(),
            Err(ParseBoardError::Columns { row: 7, found: 7 })
        );

        let bad = "...x....\n".to_string() + &"........\n".repeat(7);
        assert_eq!(
            bad.parse::<Board>(),
            Err(ParseBoardError::Symbol {
                row: 0,
                col: 3,
                symbol: 'x'
            })
        );
    }

    #[test]
    fn test_directions_table() {
        assert_eq!(Piece::man(Side::Red).directions(), &RED_MAN_DIRS);
        assert_eq!(Piece::man(Side::Black).directions(), &BLACK_MAN_DIRS);
        assert_eq!(Piece::king(Side::Red).directions().len(), 4);
        assert_eq!(Piece::king(Side::Black).directions().len(), 4);
    }
}
