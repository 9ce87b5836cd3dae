//! Board state for the railroad puzzle.
//!
//! The board is a flat column-major array of [`Piece`] values plus
//! incremental per-row and per-column counters of real pieces. The counters
//! are a standing invariant: after any mutation they equal what a full
//! rescan of the grid would produce, maintained in O(1) by
//! [`Board::set_piece`].
//!
//! This module also hosts the possibility engine ([`Board::possible_pieces`])
//! and the solution validator ([`Board::is_solved`]); both are pure queries
//! over board state.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::geometry::Direction;
use crate::pieces::{
    any_direction_pieces, one_direction_pieces, pair_pieces, Candidates, InvalidRoute, Piece,
};

/// Cells per side. Fixed by the puzzle format; the code never relies on the
/// value beyond these constants, so a generalization would start here.
pub const SIZE: usize = 8;

/// Total cell count.
pub const CELLS: usize = SIZE * SIZE;

/// Whether (x, y) lies on the board.
pub const fn in_bounds(x: i32, y: i32) -> bool {
    x >= 0 && x < SIZE as i32 && y >= 0 && y < SIZE as i32
}

/// Column-major flat index. Callers must have bounds-checked first.
const fn cell_index(x: i32, y: i32) -> usize {
    x as usize * SIZE + y as usize
}

/// A fixed path endpoint: the cell and the piece pinned there.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Endpoint {
    pub x: i32,
    pub y: i32,
    pub piece: Piece,
}

/// A pre-placed piece in the construction input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct InitialPiece {
    pub x: i32,
    pub y: i32,
    pub piece: Piece,
}

/// Construction input for a board, as produced by the puzzle-code decoder.
///
/// `cols`/`rows` are the per-column and per-row piece budgets (row 0 at the
/// bottom). The start endpoint sits at (0, `start_row`) and defaults to an
/// East-West piece; the finish sits at (`finish_col`, 0) and defaults to
/// North-South. A `pieces` entry at either endpoint coordinate overrides
/// that endpoint's piece instead of joining the general pre-placed set.
#[derive(Clone, Debug, Default)]
pub struct PuzzleDef {
    pub cols: Vec<u8>,
    pub rows: Vec<u8>,
    pub start_row: i32,
    pub finish_col: i32,
    pub pieces: Vec<InitialPiece>,
}

/// Construction failures. All recoverable: retry with corrected input.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum LayoutError {
    #[error("column constraints must be {SIZE} values in 0..={SIZE}")]
    InvalidColConstraints,
    #[error("row constraints must be {SIZE} values in 0..={SIZE}")]
    InvalidRowConstraints,
    #[error("start row {0} out of range")]
    StartOutOfRange(i32),
    #[error("finish column {0} out of range")]
    FinishOutOfRange(i32),
    #[error("initial piece position ({x}, {y}) is outside the grid")]
    PieceOutOfBounds { x: i32, y: i32 },
    #[error("initial piece at ({x}, {y}) is not a track piece")]
    NotATrackPiece { x: i32, y: i32 },
}

/// Rejected `set_piece` target.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
#[error("position ({x}, {y}) is outside the grid")]
pub struct PositionError {
    pub x: i32,
    pub y: i32,
}

/// A value snapshot of everything a checkpoint must be able to restore:
/// cells plus both counter arrays. Fixed-size and `Copy`, so checkpoints
/// own independent state without heap traffic.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BoardSnapshot {
    cells: [Piece; CELLS],
    col_counts: [u8; SIZE],
    row_counts: [u8; SIZE],
}

/// The mutable puzzle board.
#[derive(Clone, Debug)]
pub struct Board {
    cells: [Piece; CELLS],
    col_limits: [u8; SIZE],
    row_limits: [u8; SIZE],
    col_counts: [u8; SIZE],
    row_counts: [u8; SIZE],
    start: Endpoint,
    finish: Endpoint,
    initial: Vec<InitialPiece>,
}

impl Board {
    /// Builds and seeds a board from a puzzle definition.
    ///
    /// Validates constraints, endpoint positions and every pre-placed piece
    /// before anything is visible to the caller; on error no partially
    /// seeded board escapes.
    pub fn new(def: PuzzleDef) -> Result<Board, LayoutError> {
        if def.cols.len() != SIZE || def.cols.iter().any(|&v| v > SIZE as u8) {
            return Err(LayoutError::InvalidColConstraints);
        }
        if def.rows.len() != SIZE || def.rows.iter().any(|&v| v > SIZE as u8) {
            return Err(LayoutError::InvalidRowConstraints);
        }
        if !in_bounds(0, def.start_row) {
            return Err(LayoutError::StartOutOfRange(def.start_row));
        }
        if !in_bounds(def.finish_col, 0) {
            return Err(LayoutError::FinishOutOfRange(def.finish_col));
        }

        let mut pieces = def.pieces;
        let start = match pieces.iter().position(|p| p.x == 0 && p.y == def.start_row) {
            Some(at) => {
                let p = pieces.remove(at);
                Endpoint {
                    x: p.x,
                    y: p.y,
                    piece: p.piece,
                }
            }
            None => Endpoint {
                x: 0,
                y: def.start_row,
                piece: Piece::EastWest,
            },
        };
        let finish = match pieces.iter().position(|p| p.x == def.finish_col && p.y == 0) {
            Some(at) => {
                let p = pieces.remove(at);
                Endpoint {
                    x: p.x,
                    y: p.y,
                    piece: p.piece,
                }
            }
            None => Endpoint {
                x: def.finish_col,
                y: 0,
                piece: Piece::NorthSouth,
            },
        };

        let mut col_limits = [0u8; SIZE];
        let mut row_limits = [0u8; SIZE];
        col_limits.copy_from_slice(&def.cols);
        row_limits.copy_from_slice(&def.rows);

        let mut board = Board {
            cells: [Piece::Unknown; CELLS],
            col_limits,
            row_limits,
            col_counts: [0; SIZE],
            row_counts: [0; SIZE],
            start,
            finish,
            initial: pieces,
        };

        let mut seeds = vec![
            InitialPiece {
                x: start.x,
                y: start.y,
                piece: start.piece,
            },
            InitialPiece {
                x: finish.x,
                y: finish.y,
                piece: finish.piece,
            },
        ];
        seeds.extend(board.initial.iter().copied());
        for seed in seeds {
            if !seed.piece.is_real() {
                return Err(LayoutError::NotATrackPiece {
                    x: seed.x,
                    y: seed.y,
                });
            }
            board
                .set_piece(seed.x, seed.y, seed.piece)
                .map_err(|e| LayoutError::PieceOutOfBounds { x: e.x, y: e.y })?;
        }

        Ok(board)
    }

    /// Writes a cell, keeping the counters in step: a real piece replacing a
    /// non-real value bumps both counters, the opposite replacement drops
    /// them, anything else leaves them alone.
    pub fn set_piece(&mut self, x: i32, y: i32, piece: Piece) -> Result<(), PositionError> {
        if !in_bounds(x, y) {
            return Err(PositionError { x, y });
        }
        let index = cell_index(x, y);
        let prev = self.cells[index];
        if prev != piece {
            if prev.is_real() && !piece.is_real() {
                self.col_counts[x as usize] -= 1;
                self.row_counts[y as usize] -= 1;
            }
            if !prev.is_real() && piece.is_real() {
                self.col_counts[x as usize] += 1;
                self.row_counts[y as usize] += 1;
            }
            self.cells[index] = piece;
        }
        Ok(())
    }

    /// Reads a cell; off-grid coordinates answer with the `OutOfBounds`
    /// sentinel so neighbour scans need no bounds branching.
    pub fn get_piece(&self, x: i32, y: i32) -> Piece {
        if in_bounds(x, y) {
            self.cells[cell_index(x, y)]
        } else {
            Piece::OutOfBounds
        }
    }

    /// The neighbouring cell value one step along `dir`.
    pub fn piece_towards(&self, x: i32, y: i32, dir: Direction) -> Piece {
        let (nx, ny) = dir.step(x, y);
        self.get_piece(nx, ny)
    }

    pub fn start(&self) -> Endpoint {
        self.start
    }

    pub fn finish(&self) -> Endpoint {
        self.finish
    }

    /// Pre-placed pieces other than the endpoints, preserved for callers
    /// that need to tell authored cells from searched ones.
    pub fn initial_pieces(&self) -> &[InitialPiece] {
        &self.initial
    }

    pub fn col_limits(&self) -> &[u8; SIZE] {
        &self.col_limits
    }

    pub fn row_limits(&self) -> &[u8; SIZE] {
        &self.row_limits
    }

    pub fn col_counts(&self) -> &[u8; SIZE] {
        &self.col_counts
    }

    pub fn row_counts(&self) -> &[u8; SIZE] {
        &self.row_counts
    }

    /// Captures the mutable state a checkpoint needs.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            cells: self.cells,
            col_counts: self.col_counts,
            row_counts: self.row_counts,
        }
    }

    /// Restores a previously captured snapshot.
    pub fn restore(&mut self, snapshot: &BoardSnapshot) {
        self.cells = snapshot.cells;
        self.col_counts = snapshot.col_counts;
        self.row_counts = snapshot.row_counts;
    }

    /// The ordered list of pieces legally placeable at (x, y) right now.
    ///
    /// Pure table lookups over the neighbour classification; no recomputed
    /// piece algebra and no side effects. Decided cells (including the
    /// off-grid sentinel) yield themselves as the single "choice" so the
    /// search loop can treat every cell uniformly; a full row or column
    /// yields only Blank.
    pub fn possible_pieces(&self, x: i32, y: i32) -> Candidates {
        let piece = self.get_piece(x, y);
        if piece != Piece::Unknown {
            return Candidates::single(piece);
        }

        let (xi, yi) = (x as usize, y as usize);
        if self.col_counts[xi] >= self.col_limits[xi] {
            return Candidates::single(Piece::Blank);
        }
        let one_more_fills_col = self.col_counts[xi] + 1 == self.col_limits[xi];
        if self.row_counts[yi] >= self.row_limits[yi] {
            return Candidates::single(Piece::Blank);
        }
        let one_more_fills_row = self.row_counts[yi] + 1 == self.row_limits[yi];

        let mut inbound_mask = 0u8;
        let mut inbound_count = 0u32;
        let mut first_inbound = Direction::North;
        let mut available_mask = 0u8;
        for dir in [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ] {
            let neighbour = self.piece_towards(x, y, dir);
            if neighbour.is_real() && neighbour.comes_from(dir) {
                if inbound_count == 0 {
                    first_inbound = dir;
                }
                inbound_mask |= dir.mask();
                inbound_count += 1;
            } else if neighbour == Piece::Unknown {
                // A piece here would spend this row's (or column's) last
                // slot, so an undecided lateral (or vertical) neighbour
                // could never connect back. Exact one-short check only;
                // deliberately not a full constraint propagator.
                let row_ok =
                    matches!(dir, Direction::North | Direction::South) || !one_more_fills_row;
                let col_ok =
                    matches!(dir, Direction::East | Direction::West) || !one_more_fills_col;
                if row_ok && col_ok {
                    available_mask |= dir.mask();
                }
            }
        }

        let total = inbound_count + available_mask.count_ones();
        if inbound_count > 2 || total < 2 {
            return Candidates::EMPTY;
        }
        match inbound_count {
            2 => pair_pieces(inbound_mask),
            1 => one_direction_pieces(first_inbound, available_mask),
            _ => any_direction_pieces(available_mask),
        }
    }

    /// Whether every row and column counter equals its budget exactly.
    pub fn constraints_satisfied(&self) -> bool {
        self.col_counts == self.col_limits && self.row_counts == self.row_limits
    }

    /// Walks the track from the start endpoint (entering East) and reports
    /// whether it reaches the finish within the move budget, without
    /// revisiting a cell and without leaving the track. Dead ends, loops
    /// and off-board exits are "no route"; a piece that does not connect
    /// from the travel direction is an [`InvalidRoute`] defect because the
    /// walk only ever follows connections the pieces themselves announced.
    pub fn has_route(&self) -> Result<bool, InvalidRoute> {
        let mut x = self.start.x;
        let mut y = self.start.y;
        let mut piece = self.start.piece;
        let mut travel = Direction::East;
        let mut visited: FxHashSet<(i32, i32)> = FxHashSet::default();

        for _ in 0..CELLS {
            if !piece.is_real() {
                return Ok(false);
            }
            if x == self.finish.x && y == self.finish.y {
                return Ok(true);
            }
            if !visited.insert((x, y)) {
                return Ok(false);
            }
            travel = piece.out_dir(travel)?;
            (x, y) = travel.step(x, y);
            piece = self.get_piece(x, y);
        }
        Ok(false)
    }

    /// The full solution check: exact constraint satisfaction plus a single
    /// simple path from start to finish.
    pub fn is_solved(&self) -> Result<bool, InvalidRoute> {
        Ok(self.constraints_satisfied() && self.has_route()?)
    }
}
