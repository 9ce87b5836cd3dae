//! Plain-text board drawing.
//!
//! Layout: column constraints across the top, a box-drawing frame with one
//! glyph per cell, row constraints down the right edge, `A` marking the
//! start row label and `B` the finish column marker. Row 8 prints first;
//! the board's row 0 is the bottom line.

use crate::grid::{Board, SIZE};

fn frame_line(left: char, mid: char, right: char) -> String {
    let mut line = String::new();
    line.push(left);
    for x in 0..SIZE {
        if x > 0 {
            line.push(mid);
        }
        line.push('─');
    }
    line.push(right);
    line
}

/// Renders the board as a multi-line string. Deterministic; no colour.
pub fn draw(board: &Board) -> String {
    let start = board.start();
    let finish = board.finish();
    let mut lines = Vec::new();

    let col_limits: Vec<String> = board.col_limits().iter().map(u8::to_string).collect();
    lines.push(format!("    {}", col_limits.join(" ")));
    lines.push(format!("   {}", frame_line('┌', '┬', '┐')));

    for y in (0..SIZE as i32).rev() {
        let label = if y == start.y {
            " A ".to_string()
        } else {
            format!(" {} ", y + 1)
        };
        let mut row = label;
        row.push('│');
        for x in 0..SIZE as i32 {
            row.push(board.get_piece(x, y).glyph());
            row.push('│');
        }
        row.push(' ');
        row.push_str(&board.row_limits()[y as usize].to_string());
        lines.push(row);
        if y > 0 {
            lines.push(format!("   {}", frame_line('├', '┼', '┤')));
        }
    }

    lines.push(format!("   {}", frame_line('└', '┴', '┘')));
    let markers: Vec<String> = (0..SIZE as i32)
        .map(|x| {
            if x == finish.x {
                "B".to_string()
            } else {
                (x + 1).to_string()
            }
        })
        .collect();
    lines.push(format!("    {}", markers.join(" ")));

    lines.join("\n")
}
