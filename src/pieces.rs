//! Track pieces, the piece algebra, and the possibility lookup tables.
//!
//! A real piece connects exactly two distinct cardinal directions. The three
//! sentinels carry no direction pair: `Blank` is a decided empty cell,
//! `Unknown` an undecided cell, and `OutOfBounds` the answer to any off-grid
//! query. Sentinels take no part in the algebra; asking a piece to route an
//! entry it does not connect is the [`InvalidRoute`] defect.
//!
//! The possibility tables map direction bitsets (see
//! [`Direction::mask`](crate::geometry::Direction::mask)) to candidate piece
//! lists. They are built by `const fn` and baked into the binary, so lookups
//! during search are plain array indexing. Candidate order is fixed by the
//! canonical direction enumeration (N, S, E, W), which keeps search traces
//! reproducible across runs.

use thiserror::Error;

use crate::geometry::Direction;

/// A cell value: one of six track shapes, or a sentinel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Piece {
    NorthSouth,
    EastWest,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    /// Decided: no track here. Counts as absent for the row/column budgets.
    Blank,
    /// Undecided cell.
    Unknown,
    /// Answer to any off-grid query.
    OutOfBounds,
}

/// The six real shapes, in the fixed enumeration order used everywhere a
/// deterministic piece order is needed.
pub const REAL_PIECES: [Piece; 6] = [
    Piece::NorthSouth,
    Piece::EastWest,
    Piece::NorthEast,
    Piece::NorthWest,
    Piece::SouthEast,
    Piece::SouthWest,
];

/// Defect raised when a path is routed through a piece from a direction the
/// piece does not connect. This signals a bookkeeping bug (or a start
/// endpoint overridden with a piece that cannot face the virtual West
/// entry), never bad puzzle constraints.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
#[error("no route through {piece:?} entering from {entry:?}")]
pub struct InvalidRoute {
    pub piece: Piece,
    pub entry: Direction,
}

impl Piece {
    /// The two directions a real piece connects; `None` for sentinels.
    pub const fn directions(self) -> Option<(Direction, Direction)> {
        match self {
            Piece::NorthSouth => Some((Direction::North, Direction::South)),
            Piece::EastWest => Some((Direction::East, Direction::West)),
            Piece::NorthEast => Some((Direction::North, Direction::East)),
            Piece::NorthWest => Some((Direction::North, Direction::West)),
            Piece::SouthEast => Some((Direction::South, Direction::East)),
            Piece::SouthWest => Some((Direction::South, Direction::West)),
            Piece::Blank | Piece::Unknown | Piece::OutOfBounds => None,
        }
    }

    /// Whether this is one of the six track shapes.
    pub const fn is_real(self) -> bool {
        self.directions().is_some()
    }

    /// Whether the piece has an end facing `dir`. Sentinels face nowhere.
    pub fn points_to(self, dir: Direction) -> bool {
        match self.directions() {
            Some((d1, d2)) => dir == d1 || dir == d2,
            None => false,
        }
    }

    /// Whether the piece connects back towards a neighbour lying in
    /// direction `dir` from it, i.e. whether it can be entered when
    /// travelling along `dir`.
    pub fn comes_from(self, dir: Direction) -> bool {
        self.points_to(dir.reverse())
    }

    /// The exit direction for a path entering while travelling `entry`.
    /// Errors if the piece does not connect from that side.
    pub fn out_dir(self, entry: Direction) -> Result<Direction, InvalidRoute> {
        let back = entry.reverse();
        match self.directions() {
            Some((d1, d2)) if back == d1 => Ok(d2),
            Some((d1, d2)) if back == d2 => Ok(d1),
            _ => Err(InvalidRoute { piece: self, entry }),
        }
    }

    /// Box-drawing glyph for text rendering. Blank and Unknown draw alike;
    /// the difference is algorithmic, not visual.
    pub const fn glyph(self) -> char {
        match self {
            Piece::NorthSouth => '┃',
            Piece::EastWest => '━',
            Piece::NorthEast => '┗',
            Piece::NorthWest => '┛',
            Piece::SouthEast => '┏',
            Piece::SouthWest => '┓',
            Piece::Blank | Piece::Unknown => ' ',
            Piece::OutOfBounds => 'X',
        }
    }

    /// Two-letter shape code used by the puzzle-code format.
    pub const fn code(self) -> Option<&'static str> {
        match self {
            Piece::NorthSouth => Some("NS"),
            Piece::EastWest => Some("EW"),
            Piece::NorthEast => Some("NE"),
            Piece::NorthWest => Some("NW"),
            Piece::SouthEast => Some("SE"),
            Piece::SouthWest => Some("SW"),
            _ => None,
        }
    }

    /// Parses a two-letter shape code.
    pub fn from_code(code: &str) -> Option<Piece> {
        match code {
            "NS" => Some(Piece::NorthSouth),
            "EW" => Some(Piece::EastWest),
            "NE" => Some(Piece::NorthEast),
            "NW" => Some(Piece::NorthWest),
            "SE" => Some(Piece::SouthEast),
            "SW" => Some(Piece::SouthWest),
            _ => None,
        }
    }
}

/// A fixed-capacity, heap-free candidate list. At most six pieces can ever
/// be legal at one cell, so the backing array is inline and the whole list
/// is `Copy` — checkpoints store these by value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Candidates {
    items: [Piece; 6],
    len: u8,
}

impl Candidates {
    pub const EMPTY: Candidates = Candidates {
        items: [Piece::Unknown; 6],
        len: 0,
    };

    /// A one-element list.
    pub const fn single(piece: Piece) -> Candidates {
        Candidates::EMPTY.pushed(piece)
    }

    const fn pushed(mut self, piece: Piece) -> Candidates {
        self.items[self.len as usize] = piece;
        self.len += 1;
        self
    }

    pub const fn len(&self) -> usize {
        self.len as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Option<Piece> {
        self.as_slice().get(index).copied()
    }

    pub fn as_slice(&self) -> &[Piece] {
        &self.items[..self.len as usize]
    }
}

/// The real piece connecting exactly the two directions in `mask`, if any.
const fn piece_for_pair(mask: u8) -> Option<Piece> {
    const NS: u8 = Direction::North.mask() | Direction::South.mask();
    const EW: u8 = Direction::East.mask() | Direction::West.mask();
    const NE: u8 = Direction::North.mask() | Direction::East.mask();
    const NW: u8 = Direction::North.mask() | Direction::West.mask();
    const SE: u8 = Direction::South.mask() | Direction::East.mask();
    const SW: u8 = Direction::South.mask() | Direction::West.mask();
    match mask {
        NS => Some(Piece::NorthSouth),
        EW => Some(Piece::EastWest),
        NE => Some(Piece::NorthEast),
        NW => Some(Piece::NorthWest),
        SE => Some(Piece::SouthEast),
        SW => Some(Piece::SouthWest),
        _ => None,
    }
}

const NUM_MASKS: usize = 16;

const fn build_pair_table() -> [Candidates; NUM_MASKS] {
    let mut table = [Candidates::EMPTY; NUM_MASKS];
    let mut mask = 0;
    while mask < NUM_MASKS {
        if let Some(piece) = piece_for_pair(mask as u8) {
            table[mask] = Candidates::single(piece);
        }
        mask += 1;
    }
    table
}

const fn build_one_direction_table() -> [[Candidates; NUM_MASKS]; 4] {
    let mut table = [[Candidates::EMPTY; NUM_MASKS]; 4];
    let mut prime = 0;
    while prime < 4 {
        let prime_dir = Direction::from_index(prime);
        let mut mask = 0;
        while mask < NUM_MASKS {
            let mut list = Candidates::EMPTY;
            let mut other = 0;
            while other < 4 {
                let other_dir = Direction::from_index(other);
                if other != prime && mask as u8 & other_dir.mask() != 0 {
                    if let Some(piece) = piece_for_pair(prime_dir.mask() | other_dir.mask()) {
                        list = list.pushed(piece);
                    }
                }
                other += 1;
            }
            table[prime][mask] = list;
            mask += 1;
        }
        prime += 1;
    }
    table
}

const fn build_any_direction_table() -> [Candidates; NUM_MASKS] {
    let mut table = [Candidates::EMPTY; NUM_MASKS];
    let mut mask = 0;
    while mask < NUM_MASKS {
        let mut list = Candidates::EMPTY;
        let mut first = 0;
        while first < 4 {
            let mut second = first + 1;
            while second < 4 {
                let pair =
                    Direction::from_index(first).mask() | Direction::from_index(second).mask();
                if mask as u8 & pair == pair {
                    if let Some(piece) = piece_for_pair(pair) {
                        list = list.pushed(piece);
                    }
                }
                second += 1;
            }
            first += 1;
        }
        table[mask] = list;
        mask += 1;
    }
    table
}

static PAIR_TABLE: [Candidates; NUM_MASKS] = build_pair_table();
static ONE_DIRECTION_TABLE: [[Candidates; NUM_MASKS]; 4] = build_one_direction_table();
static ANY_DIRECTION_TABLE: [Candidates; NUM_MASKS] = build_any_direction_table();

/// Pieces whose direction pair is exactly the two-bit set `mask`.
/// One piece for each of the six valid pairs, empty for every other mask.
pub fn pair_pieces(mask: u8) -> Candidates {
    PAIR_TABLE[mask as usize & (NUM_MASKS - 1)]
}

/// Pieces connecting `mandatory` with one direction drawn from
/// `available_mask`, in canonical direction order.
pub fn one_direction_pieces(mandatory: Direction, available_mask: u8) -> Candidates {
    ONE_DIRECTION_TABLE[mandatory.index()][available_mask as usize & (NUM_MASKS - 1)]
}

/// Pieces whose both directions lie within `available_mask`, in canonical
/// pair order.
pub fn any_direction_pieces(available_mask: u8) -> Candidates {
    ANY_DIRECTION_TABLE[available_mask as usize & (NUM_MASKS - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction::{East, North, South, West};
    use strum::VariantArray;

    #[test]
    fn real_pieces_connect_two_distinct_directions() {
        for piece in REAL_PIECES {
            let (d1, d2) = piece.directions().unwrap();
            assert_ne!(d1, d2, "{piece:?}");
            assert!(piece.points_to(d1));
            assert!(piece.points_to(d2));
        }
    }

    #[test]
    fn sentinels_face_nowhere() {
        for piece in [Piece::Blank, Piece::Unknown, Piece::OutOfBounds] {
            assert!(!piece.is_real());
            for &dir in Direction::VARIANTS {
                assert!(!piece.points_to(dir));
                assert!(!piece.comes_from(dir));
                assert!(piece.out_dir(dir).is_err());
            }
        }
    }

    #[test]
    fn out_dir_returns_the_other_end() {
        // entering against one end exits through the other, for both ends
        for piece in REAL_PIECES {
            let (d1, d2) = piece.directions().unwrap();
            assert_eq!(piece.out_dir(d1.reverse()), Ok(d2));
            assert_eq!(piece.out_dir(d2.reverse()), Ok(d1));
        }
    }

    #[test]
    fn out_dir_rejects_unconnected_entries() {
        assert_eq!(
            Piece::NorthSouth.out_dir(East),
            Err(InvalidRoute {
                piece: Piece::NorthSouth,
                entry: East,
            })
        );
        assert!(Piece::EastWest.out_dir(North).is_err());
    }

    #[test]
    fn pair_table_holds_exactly_the_six_shapes() {
        let mut found = Vec::new();
        for mask in 0..16u8 {
            let list = pair_pieces(mask);
            if mask.count_ones() != 2 {
                assert!(list.is_empty(), "mask {mask:#06b}");
                continue;
            }
            if let Some(piece) = list.get(0) {
                assert_eq!(list.len(), 1);
                let (d1, d2) = piece.directions().unwrap();
                assert_eq!(d1.mask() | d2.mask(), mask);
                found.push(piece);
            }
        }
        found.sort_by_key(|p| *p as u8);
        let mut expected = REAL_PIECES.to_vec();
        expected.sort_by_key(|p| *p as u8);
        assert_eq!(found, expected);
    }

    #[test]
    fn one_direction_lists_follow_canonical_order() {
        let list = one_direction_pieces(East, North.mask() | West.mask());
        assert_eq!(list.as_slice(), &[Piece::NorthEast, Piece::EastWest]);

        let list = one_direction_pieces(North, South.mask() | East.mask() | West.mask());
        assert_eq!(
            list.as_slice(),
            &[Piece::NorthSouth, Piece::NorthEast, Piece::NorthWest]
        );
    }

    #[test]
    fn one_direction_with_single_available_is_the_pair_piece() {
        let list = one_direction_pieces(South, West.mask());
        assert_eq!(list.as_slice(), &[Piece::SouthWest]);
    }

    #[test]
    fn any_direction_full_mask_lists_all_shapes() {
        let list = any_direction_pieces(0b1111);
        assert_eq!(
            list.as_slice(),
            &[
                Piece::NorthSouth,
                Piece::NorthEast,
                Piece::NorthWest,
                Piece::SouthEast,
                Piece::SouthWest,
                Piece::EastWest,
            ]
        );
    }

    #[test]
    fn any_direction_subsets() {
        let list = any_direction_pieces(North.mask() | East.mask() | West.mask());
        assert_eq!(
            list.as_slice(),
            &[Piece::NorthEast, Piece::NorthWest, Piece::EastWest]
        );
        assert!(any_direction_pieces(North.mask()).is_empty());
        assert!(any_direction_pieces(0).is_empty());
    }

    #[test]
    fn shape_codes_round_trip() {
        for piece in REAL_PIECES {
            let code = piece.code().unwrap();
            assert_eq!(Piece::from_code(code), Some(piece));
        }
        assert_eq!(Piece::from_code("XX"), None);
        assert_eq!(Piece::Blank.code(), None);
    }
}
