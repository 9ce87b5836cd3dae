//! Railroad Puzzle Solver
//!
//! Solves 8×8 railroad puzzles given as compact puzzle codes: row and
//! column piece budgets, pinned start/finish endpoints, and optional
//! pre-placed pieces. The solver runs a checkpointed depth-first search and
//! can replay it step by step in the terminal.

use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};

use railtrack::{persistence, render, Board, Solver};

/// ANSI clear-screen plus cursor home, for the animation loop.
const CLEAR: &str = "\x1b[2J\x1b[;H";

/// Solves 8x8 railroad puzzles from compact puzzle codes.
#[derive(Parser)]
#[command(name = "railtrack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a puzzle and print the solved board.
    Solve {
        /// Puzzle code, e.g. 34-14134454-32642351-82NW
        code: String,
        /// Redraw the board after every search step, with this frame delay
        /// in milliseconds.
        #[arg(long)]
        animate: Option<u64>,
    },
    /// Print the seeded board without solving it.
    Show {
        /// Puzzle code.
        code: String,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Solve { code, animate } => run_solve(&code, animate),
        Command::Show { code } => run_show(&code),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn build(code: &str) -> Result<Board, String> {
    let def = persistence::decode(code).map_err(|e| e.to_string())?;
    Board::new(def).map_err(|e| e.to_string())
}

fn run_solve(code: &str, animate: Option<u64>) -> Result<(), String> {
    let board = build(code)?;
    let mut solver = Solver::new(board);

    let solved = match animate {
        Some(frame_ms) => solver
            .solve_observed(|board| {
                println!("{CLEAR}{}", render::draw(board));
                thread::sleep(Duration::from_millis(frame_ms));
            })
            .map_err(|e| e.to_string())?,
        None => solver.solve().map_err(|e| e.to_string())?,
    };

    if !solved {
        return Err(format!(
            "no solution found after {} steps",
            solver.steps()
        ));
    }
    println!("{}", render::draw(solver.board()));
    println!("solved in {} steps", solver.steps());
    Ok(())
}

fn run_show(code: &str) -> Result<(), String> {
    let board = build(code)?;
    println!("{}", render::draw(&board));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_board_snapshot() {
        let board = build("34-14134454-32642351-82NW").unwrap();
        insta::assert_snapshot!(render::draw(&board));
    }

    #[test]
    fn solve_reports_unreachable_puzzles() {
        // the start row budget is already spent by the endpoints
        assert!(run_solve("15-11111111-11111111-", None).is_err());
    }
}
