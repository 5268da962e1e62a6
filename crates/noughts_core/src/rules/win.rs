//! Win evaluation over the fixed table of lines.

use crate::types::{Board, Player};
use tracing::instrument;

/// The 8 lines that decide a round: 3 rows, 3 columns, 2 diagonals.
///
/// [`check_winner`] walks them in this order and stops at the first
/// satisfied entry.
pub const WIN_LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Looks for three matching marks along any line.
///
/// At most one player can hold a completed line when this runs after
/// every placement, so the scan order never changes the answer.
#[instrument]
pub fn check_winner(board: &Board) -> Option<Player> {
    WIN_LINES.iter().find_map(|&[a, b, c]| {
        let player = board.get(a)?.player()?;
        (board.get(b)?.player() == Some(player) && board.get(c)?.player() == Some(player))
            .then_some(player)
    })
}
