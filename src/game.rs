//! Game state controller: selection, highlights and the click state machine.
//!
//! [`Game`] is the single owned session object a front end holds. Every user
//! interaction arrives as [`Game::on_cell_click`] and resolves to a [`Click`]:
//!
//! | state         | click                         | result                          |
//! |---------------|-------------------------------|---------------------------------|
//! | Idle          | own piece                     | Selected, destinations shown    |
//! | Idle          | empty / opponent              | nothing                         |
//! | Selected      | legal destination             | move; Idle, or Chain-forced     |
//! | Selected      | own piece                     | reselect                        |
//! | Selected      | anything else                 | Idle                            |
//! | Chain-forced  | legal jump                    | move; Idle, or still chaining   |
//! | Chain-forced  | anything else                 | selection kept                  |
//!
//! Win detection runs only when the turn actually passes. The winner is
//! reported once through [`Game::take_event`].

use log::{debug, info};

use crate::board::{Board, Cell, Coord, Side};
use crate::constants::N;
use crate::movegen::{capture_moves, generate_moves, has_moves, has_pieces};
use crate::position::{MoveError, MoveOutcome, Position};

/// Whether the game is still being played.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won(Side),
}

/// One-shot notification for the front end.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Won(Side),
}

/// What a click did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Click {
    /// A piece was selected (or reselected)
    Selected(Coord),
    /// A move was applied
    Moved(MoveOutcome),
    /// The selection was dropped
    Deselected,
    /// Nothing changed
    Ignored,
}

pub struct Game {
    pos: Position,
    selection: Option<Coord>,
    highlights: Vec<Coord>,
    status: Status,
    event: Option<GameEvent>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A new game from the starting position.
    pub fn new() -> Self {
        Self::from_position(Position::new())
    }

    /// A game continuing from an arbitrary position.
    ///
    /// If that position already has a multi-jump pending, the chaining piece
    /// starts selected.
    pub fn from_position(pos: Position) -> Self {
        let mut game = Self {
            pos,
            selection: None,
            highlights: Vec::new(),
            status: Status::InProgress,
            event: None,
        };
        if let Some(chain) = game.pos.pending_chain {
            game.select_chain(chain);
        }
        game
    }

    /// Restore the starting position and clear all transient state.
    pub fn reset(&mut self) {
        self.pos.reset();
        self.clear_selection();
        self.status = Status::InProgress;
        self.event = None;
        info!("game reset");
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn board(&self) -> &Board {
        &self.pos.board
    }

    /// Contents of a cell. Off-board coordinates read as empty.
    pub fn cell_state(&self, row: usize, col: usize) -> Cell {
        self.pos.board.get((row, col))
    }

    pub fn current_player(&self) -> Side {
        self.pos.turn
    }

    pub fn selection(&self) -> Option<Coord> {
        self.selection
    }

    pub fn highlighted_destinations(&self) -> &[Coord] {
        &self.highlights
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn winner(&self) -> Option<Side> {
        match self.status {
            Status::Won(side) => Some(side),
            Status::InProgress => None,
        }
    }

    /// True while the selected piece is in the middle of a multi-jump.
    pub fn is_chain_forced(&self) -> bool {
        self.pos.pending_chain.is_some()
    }

    /// Take the pending notification, if any. Each event is returned once.
    pub fn take_event(&mut self) -> Option<GameEvent> {
        self.event.take()
    }

    /// Handle a click on `(row, col)`.
    pub fn on_cell_click(&mut self, row: usize, col: usize) -> Click {
        if self.status != Status::InProgress || row >= N || col >= N {
            return Click::Ignored;
        }
        let target = (row, col);

        let Some(from) = self.selection else {
            return if self.select(target) {
                Click::Selected(target)
            } else {
                Click::Ignored
            };
        };

        if let Ok(outcome) = self.play(from, target) {
            return Click::Moved(outcome);
        }

        if self.is_chain_forced() {
            // The jumping piece stays selected until it finishes its turn:
            // the position only accepts further jumps by that piece, so
            // switching or dropping the selection would leave no legal click.
            Click::Ignored
        } else if self.select(target) {
            Click::Selected(target)
        } else {
            self.clear_selection();
            Click::Deselected
        }
    }

    /// Apply `from` -> `to` directly, bypassing selection. Returns whether
    /// the move was legal.
    pub fn try_move(&mut self, from: Coord, to: Coord) -> bool {
        self.play(from, to).is_ok()
    }

    /// Like [`Game::try_move`], but reports why a move was rejected.
    ///
    /// # Errors
    /// [`MoveError::GameOver`] once the game is decided, otherwise whatever
    /// [`Position::try_move`] rejects the move with.
    pub fn play(&mut self, from: Coord, to: Coord) -> Result<MoveOutcome, MoveError> {
        if self.status != Status::InProgress {
            return Err(MoveError::GameOver);
        }
        let outcome = self.pos.try_move(from, to)?;
        if outcome.chain_pending {
            self.select_chain(outcome.to);
        } else {
            self.clear_selection();
            self.check_winner();
        }
        Ok(outcome)
    }

    /// Select `target` if it holds a piece of the side to move.
    fn select(&mut self, target: Coord) -> bool {
        let Cell::Occupied(piece) = self.pos.board.get(target) else {
            return false;
        };
        if piece.side != self.pos.turn {
            return false;
        }
        self.selection = Some(target);
        self.highlights = generate_moves(&self.pos.board, target, piece);
        debug!("selected {target:?}, destinations {:?}", self.highlights);
        true
    }

    fn select_chain(&mut self, at: Coord) {
        self.selection = Some(at);
        self.highlights = match self.pos.board.get(at).piece() {
            Some(piece) => capture_moves(&self.pos.board, at, piece),
            None => Vec::new(),
        };
    }

    fn clear_selection(&mut self) {
        self.selection = None;
        self.highlights.clear();
    }

    /// Called after the turn passes: the new side to move loses if it has
    /// no pieces or no legal move.
    fn check_winner(&mut self) {
        let side = self.pos.turn;
        if !has_pieces(&self.pos.board, side) || !has_moves(&self.pos.board, side) {
            let winner = side.opponent();
            self.status = Status::Won(winner);
            self.event = Some(GameEvent::Won(winner));
            info!("{winner} wins");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_own_piece() {
        let mut game = Game::new();
        assert_eq!(game.on_cell_click(2, 1), Click::Selected((2, 1)));
        assert_eq!(game.selection(), Some((2, 1)));
        let mut dests = game.highlighted_destinations().to_vec();
        dests.sort();
        assert_eq!(dests, vec![(3, 0), (3, 2)]);
    }

    #[test]
    fn test_idle_clicks_ignored() {
        let mut game = Game::new();
        assert_eq!(game.on_cell_click(3, 0), Click::Ignored);
        assert_eq!(game.on_cell_click(5, 0), Click::Ignored);
        assert_eq!(game.on_cell_click(8, 8), Click::Ignored);
        assert_eq!(game.selection(), None);
        assert!(game.highlighted_destinations().is_empty());
    }

    #[test]
    fn test_click_move() {
        let mut game = Game::new();
        game.on_cell_click(2, 1);
        let click = game.on_cell_click(3, 0);
        assert!(matches!(click, Click::Moved(o) if o.to == (3, 0)));
        assert_eq!(game.current_player(), Side::Black);
        assert_eq!(game.selection(), None);
        assert!(game.highlighted_destinations().is_empty());
    }

    #[test]
    fn test_reselect_and_deselect() {
        let mut game = Game::new();
        game.on_cell_click(2, 1);
        assert_eq!(game.on_cell_click(2, 3), Click::Selected((2, 3)));
        assert_eq!(game.selection(), Some((2, 3)));

        assert_eq!(game.on_cell_click(4, 4), Click::Deselected);
        assert_eq!(game.selection(), None);
        assert!(game.highlighted_destinations().is_empty());
        assert_eq!(game.current_player(), Side::Red);
    }

    #[test]
    fn test_try_move_bool() {
        let mut game = Game::new();
        assert!(!game.try_move((3, 0), (4, 1)));
        assert!(game.try_move((2, 1), (3, 0)));
        assert_eq!(game.current_player(), Side::Black);
    }

    #[test]
    fn test_play_reports_reason() {
        let mut game = Game::new();
        assert_eq!(game.play((3, 0), (4, 1)), Err(MoveError::EmptySource));
        assert_eq!(game.play((5, 0), (4, 1)), Err(MoveError::NotYourTurn));
        let outcome = game.play((2, 1), (3, 0)).unwrap();
        assert_eq!(outcome.to, (3, 0));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut game = Game::new();
        game.on_cell_click(2, 1);
        game.on_cell_click(3, 0);
        game.on_cell_click(5, 2);
        game.reset();
        assert_eq!(game.position(), &Position::new());
        assert_eq!(game.current_player(), Side::Red);
        assert_eq!(game.selection(), None);
        assert!(game.highlighted_destinations().is_empty());
        assert_eq!(game.status(), Status::InProgress);
    }
}
