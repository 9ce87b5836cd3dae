//! The four cardinal directions and their coordinate algebra.
//!
//! Directions carry three things the rest of the crate leans on: a fixed
//! reverse pairing (North↔South, East↔West), an unchecked coordinate step,
//! and a power-of-two mask so sets of directions are plain `u8` bitsets.
//! The possibility tables in [`crate::pieces`] are indexed by those bitsets.

use strum::VariantArray;

/// A cardinal direction. `y` grows northwards: row 0 is the bottom of the
/// board, matching the way constraints and endpoints are addressed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, VariantArray)]
#[repr(u8)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// The opposite direction. An involution: `d.reverse().reverse() == d`.
    pub const fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// The adjacent coordinate one cell away. Performs no bounds checking;
    /// callers resolve off-board coordinates through
    /// [`crate::grid::Board::get_piece`], which answers with a sentinel.
    pub const fn step(self, x: i32, y: i32) -> (i32, i32) {
        match self {
            Direction::North => (x, y + 1),
            Direction::South => (x, y - 1),
            Direction::East => (x + 1, y),
            Direction::West => (x - 1, y),
        }
    }

    /// Unique power-of-two flag for direction bitsets.
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }

    /// Stable index in declaration order, used by the possibility tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub(crate) const fn from_index(index: usize) -> Direction {
        match index {
            0 => Direction::North,
            1 => Direction::South,
            2 => Direction::East,
            _ => Direction::West,
        }
    }
}
