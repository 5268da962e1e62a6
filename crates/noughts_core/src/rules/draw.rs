//! Board-full detection; a full board with no line is a draw.

use crate::types::{Board, Square};
use tracing::instrument;

/// True once every square is claimed.
#[instrument]
pub fn is_full(board: &Board) -> bool {
    !board.squares().contains(&Square::Empty)
}
