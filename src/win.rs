//! Detection of completed lines and the windowing shared with the evaluator

use std::ops::Range;

use crate::board::{Board, Piece};

/// A straight run of cells starting at `(row, column)`
///
/// Windows advance by `(d_row, d_column)` per cell, one of the four scan
/// orientations: horizontal, vertical, diagonal `\` and diagonal `/`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Window {
    pub row: usize,
    pub column: usize,
    pub d_row: isize,
    pub d_column: isize,
}

/// Horizontal, vertical, diagonal `\`, diagonal `/`
pub const ORIENTATIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

impl Window {
    /// The coordinates of the `i`th cell of this window
    #[inline]
    pub fn cell(&self, i: usize) -> (usize, usize) {
        (
            (self.row as isize + self.d_row * i as isize) as usize,
            (self.column as isize + self.d_column * i as isize) as usize,
        )
    }

    pub fn pieces<'a>(&self, board: &'a Board, length: usize) -> impl Iterator<Item = Piece> + 'a {
        let window = *self;
        (0..length).map(move |i| {
            let (row, column) = window.cell(i);
            board.get(row, column)
        })
    }
}

// the valid anchor positions along one axis for a window moving by `delta`
fn anchors(extent: usize, length: usize, delta: isize) -> Range<usize> {
    match delta {
        0 => 0..extent,
        1 => 0..(extent + 1).saturating_sub(length),
        _ => length.saturating_sub(1)..extent.max(length.saturating_sub(1)),
    }
}

/// Every window of `length` cells that fits on a `rows` x `columns` board
pub fn windows(rows: usize, columns: usize, length: usize) -> impl Iterator<Item = Window> {
    ORIENTATIONS.iter().flat_map(move |&(d_row, d_column)| {
        anchors(rows, length, d_row).flat_map(move |row| {
            anchors(columns, length, d_column).map(move |column| Window {
                row,
                column,
                d_row,
                d_column,
            })
        })
    })
}

/// Returns true if `piece` has at least `connect_length` in a row anywhere on the board
///
/// Lengths 3, 4 and 5 use unrolled comparisons, any other length falls back
/// to [`has_line_generic`]. Both give identical answers.
pub fn has_line(board: &Board, piece: Piece, connect_length: usize) -> bool {
    if piece.is_empty() {
        return false;
    }
    match connect_length {
        3 => scan(board, piece, 3, line_of_3),
        4 => scan(board, piece, 4, line_of_4),
        5 => scan(board, piece, 5, line_of_5),
        _ => has_line_generic(board, piece, connect_length),
    }
}

/// Line detection for any `connect_length`
pub fn has_line_generic(board: &Board, piece: Piece, connect_length: usize) -> bool {
    if piece.is_empty() || connect_length == 0 {
        return false;
    }
    scan(board, piece, connect_length, |board, piece, window| {
        window.pieces(board, connect_length).all(|cell| cell == piece)
    })
}

fn scan<F>(board: &Board, piece: Piece, length: usize, is_line: F) -> bool
where
    F: Fn(&Board, Piece, &Window) -> bool,
{
    windows(board.rows(), board.columns(), length)
        // skip windows whose anchor is not ours before walking them
        .filter(|window| board.get(window.row, window.column) == piece)
        .any(|window| is_line(board, piece, &window))
}

#[inline]
fn at(board: &Board, window: &Window, i: usize) -> Piece {
    let (row, column) = window.cell(i);
    board.get(row, column)
}

fn line_of_3(board: &Board, piece: Piece, w: &Window) -> bool {
    at(board, w, 1) == piece && at(board, w, 2) == piece
}

fn line_of_4(board: &Board, piece: Piece, w: &Window) -> bool {
    at(board, w, 1) == piece && at(board, w, 2) == piece && at(board, w, 3) == piece
}

fn line_of_5(board: &Board, piece: Piece, w: &Window) -> bool {
    at(board, w, 1) == piece
        && at(board, w, 2) == piece
        && at(board, w, 3) == piece
        && at(board, w, 4) == piece
}
