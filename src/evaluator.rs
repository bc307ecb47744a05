//! Positional heuristic used to score non-terminal leaves of the search

use crate::board::{Board, Piece};
use crate::win::{windows, Window};

/// Bonus per piece in the centre column
pub const CENTER_WEIGHT: i32 = 3;
/// Score of a window completely filled by the evaluated piece
pub const WIN_WINDOW_SCORE: i32 = 100;
/// Weight of an open window held by the evaluated piece
pub const WEIGHT_OWN: i32 = 3;
/// Weight of an open window held by the opponent
pub const WEIGHT_OPP: i32 = 2;

/// Scores a single window from the perspective of `piece`
///
/// A window needing `k` more pieces (`1 <= k <= length - 2`) and containing
/// nothing else is worth `WEIGHT_OWN * k` to its owner and
/// `-WEIGHT_OPP * k` to the other side. Windows holding both colours can
/// never become a line and score nothing.
pub fn score_window(own: usize, opponent: usize, empty: usize, length: usize) -> i32 {
    if own == length {
        return WIN_WINDOW_SCORE;
    }
    let mut score = 0;
    for k in 1..=length.saturating_sub(2) {
        if empty != k {
            continue;
        }
        if own == length - k {
            score += WEIGHT_OWN * k as i32;
        }
        if opponent == length - k {
            score -= WEIGHT_OPP * k as i32;
        }
    }
    score
}

fn tally(board: &Board, window: &Window, piece: Piece, length: usize) -> (usize, usize, usize) {
    let opponent = piece.opponent();
    window
        .pieces(board, length)
        .fold((0, 0, 0), |(own, opp, empty), cell| match cell {
            c if c == piece => (own + 1, opp, empty),
            c if c == opponent => (own, opp + 1, empty),
            _ => (own, opp, empty + 1),
        })
}

/// Heuristic value of `board` for `piece`, higher is better for `piece`
pub fn score(board: &Board, piece: Piece, connect_length: usize) -> i32 {
    let center = board.columns() / 2;
    let center_count = (0..board.rows())
        .filter(|&row| board.get(row, center) == piece)
        .count() as i32;

    windows(board.rows(), board.columns(), connect_length)
        .map(|window| {
            let (own, opponent, empty) = tally(board, &window, piece, connect_length);
            score_window(own, opponent, empty, connect_length)
        })
        .sum::<i32>()
        + CENTER_WEIGHT * center_count
}
