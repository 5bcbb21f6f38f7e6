//! Line-oriented text protocol for driving a [`Game`] from a front end.
//!
//! The framing follows GTP: each command line may start with a numeric id,
//! success responses start with `=`, failures with `?`, and every response is
//! terminated by a blank line. Empty lines and `#` comments are skipped.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the program
//! - `reset` - Start a new game
//! - `show` - Render the board, selection (`*`), highlights (`+`) and turn
//! - `turn` - Side to move
//! - `cell <row> <col>` - Contents of one cell
//! - `click <row> <col>` - Click a cell, as a graphical board would
//! - `move <row> <col> <row> <col>` - Play a move directly
//! - `selection` - Selected square, or `none`
//! - `highlights` - Highlighted destinations
//! - `status` - `playing`, or the winner
//!
//! When a command ends the game, `<side> wins` is appended to its response.
//!
//! ## Example
//!
//! ```ignore
//! use checkers_rust::protocol::Session;
//! let mut session = Session::new();
//! session.run()?;
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::board::{Coord, Side};
use crate::constants::N;
use crate::game::{Click, Game, GameEvent, Status};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "cell",
    "click",
    "highlights",
    "known_command",
    "list_commands",
    "move",
    "name",
    "quit",
    "reset",
    "selection",
    "show",
    "status",
    "turn",
    "version",
];

/// Protocol session state.
pub struct Session {
    game: Game,
    /// Print the board after every command that changes it
    show_board: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_game(Game::new())
    }

    pub fn with_game(game: Game) -> Self {
        Self {
            game,
            show_board: false,
        }
    }

    pub fn show_board(mut self, show: bool) -> Self {
        self.show_board = show;
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop on stdin/stdout.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop on arbitrary streams until `quit` or end of input.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        let (success, mut message, changed) = match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string(), false),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string(), false),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n"), false),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string(), false)
                }
                None => (false, "missing argument".to_string(), false),
            },

            "quit" => (true, String::new(), false),

            "reset" => {
                self.game.reset();
                (true, String::new(), true)
            }

            "show" => (true, render(&self.game), false),

            "turn" => (true, self.game.current_player().to_string(), false),

            "cell" => match parse_coords::<1>(args) {
                Ok([(row, col)]) => {
                    let symbol = self.game.cell_state(row, col).symbol();
                    (true, symbol.to_string(), false)
                }
                Err(e) => (false, e, false),
            },

            "click" => match parse_coords::<1>(args) {
                Ok([(row, col)]) => {
                    let click = self.game.on_cell_click(row, col);
                    let changed = matches!(click, Click::Moved(_));
                    (true, describe_click(&click), changed)
                }
                Err(e) => (false, e, false),
            },

            "move" => match parse_coords::<2>(args) {
                Ok([from, to]) => match self.game.play(from, to) {
                    Ok(outcome) => (true, describe_click(&Click::Moved(outcome)), true),
                    Err(e) => (false, e.to_string(), false),
                },
                Err(e) => (false, e, false),
            },

            "selection" => (
                true,
                self.game
                    .selection()
                    .map_or_else(|| "none".to_string(), str_coord),
                false,
            ),

            "highlights" => (
                true,
                self.game
                    .highlighted_destinations()
                    .iter()
                    .map(|&c| str_coord(c))
                    .collect::<Vec<_>>()
                    .join(" "),
                false,
            ),

            "status" => (
                true,
                match self.game.status() {
                    Status::InProgress => "playing".to_string(),
                    Status::Won(side) => format!("{side} wins"),
                },
                false,
            ),

            _ => (false, format!("unknown command: {command}"), false),
        };

        if let Some(GameEvent::Won(side)) = self.game.take_event() {
            push_line(&mut message, &format!("{side} wins"));
        }
        if changed && self.show_board {
            push_line(&mut message, &render(&self.game));
        }
        (success, message)
    }
}

fn push_line(message: &mut String, line: &str) {
    if !message.is_empty() {
        message.push('\n');
    }
    message.push_str(line);
}

/// Parse `K` coordinate pairs from whitespace-separated numbers.
fn parse_coords<const K: usize>(args: &[&str]) -> Result<[Coord; K], String> {
    if args.len() != 2 * K {
        return Err(format!("expected {} numbers, got {}", 2 * K, args.len()));
    }
    let mut coords = [(0, 0); K];
    for (i, pair) in args.chunks(2).enumerate() {
        let mut nums = [0usize; 2];
        for (n, arg) in nums.iter_mut().zip(pair) {
            *n = arg
                .parse::<usize>()
                .map_err(|_| format!("invalid coordinate: {arg}"))?;
            if *n >= N {
                return Err(format!("coordinate out of range: {arg}"));
            }
        }
        coords[i] = (nums[0], nums[1]);
    }
    Ok(coords)
}

/// Format a coordinate as `row,col`.
pub fn str_coord((row, col): Coord) -> String {
    format!("{row},{col}")
}

fn describe_click(click: &Click) -> String {
    match click {
        Click::Selected(c) => format!("selected {}", str_coord(*c)),
        Click::Deselected => "deselected".to_string(),
        Click::Ignored => "ignored".to_string(),
        Click::Moved(o) => {
            let mut s = format!("moved {} {}", str_coord(o.from), str_coord(o.to));
            if let Some(c) = o.captured {
                s.push_str(&format!(" captured {}", str_coord(c)));
            }
            if o.promoted {
                s.push_str(" crowned");
            }
            if o.chain_pending {
                s.push_str(" continue");
            }
            s
        }
    }
}

/// Render the board for a terminal. The selected piece is prefixed with `*`
/// and highlighted destinations are drawn as `+`. A column ruler and the turn
/// line follow the board.
pub fn render(game: &Game) -> String {
    let mut out = String::new();
    for row in 0..N {
        out.push_str(&format!("{row} "));
        for col in 0..N {
            let coord = (row, col);
            let marker = if game.selection() == Some(coord) { '*' } else { ' ' };
            let symbol = if game.highlighted_destinations().contains(&coord) {
                '+'
            } else {
                game.cell_state(row, col).symbol()
            };
            out.push(marker);
            out.push(symbol);
        }
        out.push('\n');
    }
    out.push_str("  ");
    for col in 0..N {
        out.push_str(&format!(" {col}"));
    }
    out.push('\n');
    let turn = match game.current_player() {
        Side::Red => "RED",
        Side::Black => "BLACK",
    };
    out.push_str(&format!("{turn}'s turn"));
    out
}
