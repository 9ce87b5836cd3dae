//! Railroad Puzzle Solver Library
//!
//! Solves the 8×8 railroad puzzle: each row and column says how many track
//! pieces it must hold, two edge cells are pinned as the start and finish,
//! and a valid solution threads a single non-branching, non-looping track
//! between them while landing every row and column exactly on its budget.
//!
//! The pipeline: [`persistence::decode`] turns a compact puzzle code into a
//! [`grid::PuzzleDef`], [`grid::Board::new`] validates and seeds the board,
//! and [`solver::Solver`] runs the checkpointed depth-first search.

pub mod geometry;
pub mod grid;
pub mod persistence;
pub mod pieces;
pub mod render;
pub mod solver;

use thiserror::Error;

pub use grid::{Board, PuzzleDef};
pub use solver::{Solver, Status};

/// Any failure on the decode → construct → solve path.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] persistence::DecodeError),
    #[error(transparent)]
    Layout(#[from] grid::LayoutError),
    #[error(transparent)]
    Solve(#[from] solver::SolveError),
}

/// Decodes, builds and solves a puzzle code in one call. Returns whether a
/// solution was found, together with the final board (solved, or as far as
/// the failed search left it restored).
pub fn solve_code(code: &str) -> Result<(bool, Board), Error> {
    let board = Board::new(persistence::decode(code)?)?;
    let mut solver = Solver::new(board);
    let solved = solver.solve()?;
    Ok((solved, solver.into_board()))
}
