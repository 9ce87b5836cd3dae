//! Checkpointed depth-first search over the board.
//!
//! The solver owns the board for the duration of a solve and drives a
//! three-state machine: each step looks at the top checkpoint, tries that
//! cell's next untried candidate, and either extends the path with a fresh
//! checkpoint or rolls the board back to the nearest checkpoint that still
//! has candidates left. An empty stack is global failure.
//!
//! Checkpoints are `Copy` value snapshots with fixed-size buffers, so
//! pushing one is a memcpy and restoring one cannot alias live state.

use log::{debug, trace};
use thiserror::Error;

use crate::geometry::Direction;
use crate::grid::{Board, BoardSnapshot, PositionError, CELLS};
use crate::pieces::{Candidates, InvalidRoute};

/// Outcome of a single search step. `Solved` and `Failed` are terminal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    Continue,
    Solved,
    Failed,
}

/// Defects a solve can surface. Neither occurs for well-formed puzzles with
/// a correct engine; both indicate inconsistent state, not bad constraints.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    Route(#[from] InvalidRoute),
    #[error(transparent)]
    Position(#[from] PositionError),
}

/// A resumable search state: the board as it was before this cell was
/// decided, the cell's candidate list, and a cursor marking the next
/// candidate to try.
#[derive(Clone, Copy)]
struct Checkpoint {
    snapshot: BoardSnapshot,
    candidates: Candidates,
    cursor: usize,
    x: i32,
    y: i32,
    entry: Direction,
}

/// The depth-first search engine.
pub struct Solver {
    board: Board,
    stack: Vec<Checkpoint>,
    steps: u64,
}

impl Solver {
    pub fn new(board: Board) -> Solver {
        Solver {
            board,
            stack: Vec::with_capacity(CELLS),
            steps: 0,
        }
    }

    /// Read access for observers and callers; the solver alone mutates the
    /// board while a solve is in progress.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Steps taken since the last [`begin`](Solver::begin).
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Hands the board back, solved or not.
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Runs the search to a terminal state. `true` means solved; `false`
    /// means the space was exhausted. Exhaustion is an ordinary outcome,
    /// never an error.
    pub fn solve(&mut self) -> Result<bool, SolveError> {
        self.solve_observed(|_| {})
    }

    /// Like [`solve`](Solver::solve), invoking `observe` with the board
    /// after every step. The observer sees state between steps and cannot
    /// influence the outcome or the step count.
    pub fn solve_observed(
        &mut self,
        mut observe: impl FnMut(&Board),
    ) -> Result<bool, SolveError> {
        self.begin()?;
        loop {
            let status = self.step()?;
            observe(&self.board);
            match status {
                Status::Continue => {}
                Status::Solved => {
                    debug!("solved in {} steps", self.steps);
                    return Ok(true);
                }
                Status::Failed => {
                    debug!("search space exhausted after {} steps", self.steps);
                    return Ok(false);
                }
            }
        }
    }

    /// Resets the stack to a single checkpoint one step past the start
    /// endpoint. The start piece's exit is computed against a virtual East
    /// entry: the path is deemed to arrive from beyond the left edge.
    pub fn begin(&mut self) -> Result<(), SolveError> {
        self.stack.clear();
        self.steps = 0;
        let start = self.board.start();
        let exit = start.piece.out_dir(Direction::East)?;
        self.push_checkpoint(start.x, start.y, exit);
        Ok(())
    }

    fn push_checkpoint(&mut self, x: i32, y: i32, exit: Direction) {
        let (nx, ny) = exit.step(x, y);
        let checkpoint = Checkpoint {
            snapshot: self.board.snapshot(),
            candidates: self.board.possible_pieces(nx, ny),
            cursor: 0,
            x: nx,
            y: ny,
            entry: exit,
        };
        self.stack.push(checkpoint);
    }

    /// Advances the search by one decision.
    pub fn step(&mut self) -> Result<Status, SolveError> {
        self.steps += 1;
        let Some(top) = self.stack.last_mut() else {
            return Ok(Status::Failed);
        };
        let (x, y, entry, cursor, candidates) = (top.x, top.y, top.entry, top.cursor, top.candidates);
        // advance the stored cursor first, so a later rollback resumes at
        // the candidate after this one no matter how this step ends
        top.cursor += 1;

        let finish = self.board.finish();
        if x == finish.x && y == finish.y {
            if self.board.is_solved()? {
                return Ok(Status::Solved);
            }
            return Ok(self.fail_or_rollback());
        }
        if candidates.is_empty() {
            return Ok(self.fail_or_rollback());
        }
        match candidates.get(cursor) {
            Some(piece) if piece.is_real() => {
                self.board.set_piece(x, y, piece)?;
                let exit = piece.out_dir(entry)?;
                self.push_checkpoint(x, y, exit);
                Ok(Status::Continue)
            }
            // Blank, the off-grid sentinel, or a spent candidate list: this
            // branch cannot carry the path further
            _ => Ok(self.fail_or_rollback()),
        }
    }

    fn fail_or_rollback(&mut self) -> Status {
        if self.rollback() {
            Status::Continue
        } else {
            Status::Failed
        }
    }

    /// Pops checkpoints until one still has an untried candidate, restores
    /// its snapshot and puts it back on top. `false` means the stack is
    /// spent and the search has failed globally.
    fn rollback(&mut self) -> bool {
        while let Some(checkpoint) = self.stack.pop() {
            if checkpoint.cursor < checkpoint.candidates.len() {
                trace!(
                    "rollback to ({}, {}) candidate {}/{}",
                    checkpoint.x,
                    checkpoint.y,
                    checkpoint.cursor,
                    checkpoint.candidates.len()
                );
                self.board.restore(&checkpoint.snapshot);
                self.stack.push(checkpoint);
                return true;
            }
        }
        false
    }
}
