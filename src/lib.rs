//! Checkers-Rust: rules engine and interaction model for 8x8 checkers.
//!
//! The crate covers board representation, move generation, move execution
//! with forced multi-jumps and promotion, and a click-driven game controller
//! with win detection. Drawing the board and wiring up input belong to the
//! front end; [`protocol`] provides a plain-text one.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, direction tables and cell symbols
//! - [`board`] - Cells, pieces and the 8x8 board
//! - [`movegen`] - Destinations for a piece, has-moves queries
//! - [`position`] - Move validation and execution
//! - [`game`] - Selection, highlights, turn and win state machine
//! - [`protocol`] - Line-based text protocol for front ends
//!
//! ## Example
//!
//! ```
//! use checkers_rust::board::{Cell, Side};
//! use checkers_rust::game::{Click, Game};
//!
//! let mut game = Game::new();
//!
//! // Select the red man on (2,1) and move it to (3,0).
//! assert_eq!(game.on_cell_click(2, 1), Click::Selected((2, 1)));
//! assert!(matches!(game.on_cell_click(3, 0), Click::Moved(_)));
//!
//! assert_eq!(game.cell_state(3, 0), Cell::RED_MAN);
//! assert_eq!(game.current_player(), Side::Black);
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod movegen;
pub mod position;
pub mod protocol;
