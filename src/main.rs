//! Checkers-Rust: an 8x8 checkers rules engine.
//!
//! ## Usage
//!
//! - `checkers-rust` - Show a demo
//! - `checkers-rust play` - Start the text protocol on stdin/stdout
//! - `checkers-rust demo` - Play a short scripted game
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`, e.g.
//! `RUST_LOG=debug checkers-rust play`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use checkers_rust::game::{Click, Game};
use checkers_rust::protocol::{render, str_coord, Session};

/// Checkers-Rust: an 8x8 checkers rules engine
#[derive(Parser)]
#[command(name = "checkers-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands from stdin and answer on stdout
    Play {
        /// Print the board after every command that changes it
        #[arg(long)]
        show_board: bool,
    },
    /// Play a short scripted game
    Demo,
}

/// Clicks for a short opening with an exchange of pieces.
#[rustfmt::skip]
const DEMO_CLICKS: &[(usize, usize)] = &[
    (2, 1), (3, 2), // red steps
    (5, 4), (4, 3), // black offers a piece
    (2, 3), (3, 2), // red picks a piece, then switches to another
    (5, 4),         // red jumps (4,3)
    (6, 5), (4, 3), // black jumps back over (5,4)
];

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play { show_board }) => {
            let mut session = Session::new().show_board(show_board);
            session.run().context("protocol session failed")?;
        }
        Some(Commands::Demo) | None => run_demo(),
    }
    Ok(())
}

fn run_demo() {
    println!("Checkers-Rust: 8x8 checkers rules engine\n");

    let mut game = Game::new();
    println!("{}\n", render(&game));

    for &(row, col) in DEMO_CLICKS {
        let click = game.on_cell_click(row, col);
        println!("click {}: {click:?}", str_coord((row, col)));
        if let Click::Moved(_) = click {
            println!("{}\n", render(&game));
        }
        if let Some(event) = game.take_event() {
            println!("{event:?}");
            break;
        }
    }
}
