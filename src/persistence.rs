//! The compact puzzle-code format.
//!
//! Codes look like `34-14134454-32642351-82NW`:
//! - first field: start row then finish column, 1-based digits;
//! - second field: the eight column constraints, left to right;
//! - third field: the eight row constraints in top-to-bottom reading order
//!   (the board stores rows bottom-up, so decoding reverses this group);
//! - fourth field: pre-placed pieces as `.`-separated `xyCC` entries with
//!   1-based coordinates and a two-letter shape code, possibly empty.
//!
//! `encode` mirrors `decode` exactly, so any decodable code re-encodes to
//! itself from the seeded board.

use thiserror::Error;

use crate::grid::{Board, InitialPiece, PuzzleDef, SIZE};
use crate::pieces::Piece;

/// Malformed puzzle code. Recoverable: fix the code and retry.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum DecodeError {
    #[error("puzzle code must have four '-'-separated fields")]
    Fields,
    #[error("endpoint field must be two digits in 1..=8")]
    Endpoints,
    #[error("constraint field `{0}` must be eight digits in 1..=8")]
    Constraints(String),
    #[error("malformed piece entry `{0}`")]
    PieceEntry(String),
}

fn digit(byte: u8) -> Option<u8> {
    match byte {
        b'1'..=b'8' => Some(byte - b'0'),
        _ => None,
    }
}

fn constraint_group(field: &str) -> Result<Vec<u8>, DecodeError> {
    let err = || DecodeError::Constraints(field.to_string());
    if field.len() != SIZE {
        return Err(err());
    }
    field.bytes().map(|b| digit(b).ok_or_else(err)).collect()
}

fn digit_string(values: impl Iterator<Item = u8>) -> String {
    values.map(|v| char::from(b'0' + v)).collect()
}

fn piece_entry(entry: &str) -> Result<InitialPiece, DecodeError> {
    let err = || DecodeError::PieceEntry(entry.to_string());
    let bytes = entry.as_bytes();
    if bytes.len() != 4 {
        return Err(err());
    }
    let x = digit(bytes[0]).ok_or_else(err)? as i32 - 1;
    let y = digit(bytes[1]).ok_or_else(err)? as i32 - 1;
    let piece = Piece::from_code(&entry[2..]).ok_or_else(err)?;
    Ok(InitialPiece { x, y, piece })
}

/// Parses a puzzle code into a construction definition.
pub fn decode(code: &str) -> Result<PuzzleDef, DecodeError> {
    let fields: Vec<&str> = code.split('-').collect();
    if fields.len() != 4 {
        return Err(DecodeError::Fields);
    }
    let (endpoints, cols, rows, pieces) = (fields[0], fields[1], fields[2], fields[3]);

    let endpoint_bytes = endpoints.as_bytes();
    if endpoint_bytes.len() != 2 {
        return Err(DecodeError::Endpoints);
    }
    let start_row = digit(endpoint_bytes[0]).ok_or(DecodeError::Endpoints)? as i32 - 1;
    let finish_col = digit(endpoint_bytes[1]).ok_or(DecodeError::Endpoints)? as i32 - 1;

    let cols = constraint_group(cols)?;
    let mut rows = constraint_group(rows)?;
    // stored order is bottom-up; the code reads top-down
    rows.reverse();

    let pieces = if pieces.is_empty() {
        Vec::new()
    } else {
        pieces.split('.').map(piece_entry).collect::<Result<_, _>>()?
    };

    Ok(PuzzleDef {
        cols,
        rows,
        start_row,
        finish_col,
        pieces,
    })
}

/// Re-derives the puzzle code from a board. Intended for seeded, unsolved
/// boards: every real piece other than the endpoints is written out as a
/// pre-placed entry, in column-major cell order.
pub fn encode(board: &Board) -> String {
    let start = board.start();
    let finish = board.finish();

    let cols = digit_string(board.col_limits().iter().copied());
    let rows = digit_string(board.row_limits().iter().rev().copied());

    let mut entries = Vec::new();
    for x in 0..SIZE as i32 {
        for y in 0..SIZE as i32 {
            if (x, y) == (start.x, start.y) || (x, y) == (finish.x, finish.y) {
                continue;
            }
            let piece = board.get_piece(x, y);
            if let Some(code) = piece.code() {
                entries.push(format!("{}{}{}", x + 1, y + 1, code));
            }
        }
    }

    format!(
        "{}{}-{}-{}-{}",
        start.y + 1,
        finish.x + 1,
        cols,
        rows,
        entries.join(".")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_the_reference_code() {
        let def = decode("34-14134454-32642351-82NW").unwrap();
        assert_eq!(def.start_row, 2);
        assert_eq!(def.finish_col, 3);
        assert_eq!(def.cols, vec![1, 4, 1, 3, 4, 4, 5, 4]);
        // stored bottom-up: the code's 32642351 reversed
        assert_eq!(def.rows, vec![1, 5, 3, 2, 4, 6, 2, 3]);
        assert_eq!(
            def.pieces,
            vec![InitialPiece {
                x: 7,
                y: 1,
                piece: Piece::NorthWest,
            }]
        );
    }

    #[test]
    fn decodes_multiple_piece_entries() {
        let def = decode("54-14134544-54234341-48EW.53NE").unwrap();
        assert_eq!(def.pieces.len(), 2);
        assert_eq!(
            def.pieces[0],
            InitialPiece {
                x: 3,
                y: 7,
                piece: Piece::EastWest,
            }
        );
        assert_eq!(
            def.pieces[1],
            InitialPiece {
                x: 4,
                y: 2,
                piece: Piece::NorthEast,
            }
        );
    }

    #[test]
    fn empty_piece_field_decodes_to_no_pieces() {
        let def = decode("11-11111111-11111111-").unwrap();
        assert!(def.pieces.is_empty());
    }

    #[test]
    fn rejects_malformed_codes() {
        assert_eq!(decode("34-14134454-32642351").unwrap_err(), DecodeError::Fields);
        assert_eq!(decode("349-14134454-32642351-").unwrap_err(), DecodeError::Endpoints);
        assert_eq!(decode("09-14134454-32642351-").unwrap_err(), DecodeError::Endpoints);
        assert!(matches!(
            decode("34-1413445-32642351-").unwrap_err(),
            DecodeError::Constraints(_)
        ));
        assert!(matches!(
            decode("34-14134450-32642351-").unwrap_err(),
            DecodeError::Constraints(_)
        ));
        assert!(matches!(
            decode("34-14134454-32642351-82XX").unwrap_err(),
            DecodeError::PieceEntry(_)
        ));
        assert!(matches!(
            decode("34-14134454-32642351-82NW.9").unwrap_err(),
            DecodeError::PieceEntry(_)
        ));
    }

    #[test]
    fn encode_inverts_decode() {
        for code in [
            "34-14134454-32642351-82NW",
            "54-14134544-54234341-48EW.53NE",
            "62-13462234-22451551-72NE.84NS",
            "11-12345678-87654321-",
        ] {
            let board = Board::new(decode(code).unwrap()).unwrap();
            assert_eq!(encode(&board), code);
        }
    }
}
