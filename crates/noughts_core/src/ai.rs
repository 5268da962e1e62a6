//! Heuristic move selection for the computer opponent.
//!
//! The computer plays O. Selection runs three tiers in strict priority
//! order: take an immediate win, block the human's immediate win, then
//! fall back to a uniformly random empty square. The first two tiers
//! scan squares in ascending board order, so they are deterministic;
//! the fallback is the only source of randomness.
//!
//! This is a one-ply heuristic, not a search. A fork (two simultaneous
//! threats) beats it.

use crate::rules;
use crate::types::{Board, Player, Square};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, instrument};

/// Picks the computer's next move, or `None` if the board is full.
///
/// The returned position is always an empty square. Moves are chosen
/// for O; pass the board as-is, before any hypothetical placement.
#[instrument(skip(board, rng))]
pub fn select_move<R: Rng>(board: &Board, rng: &mut R) -> Option<usize> {
    let open = board.empty_positions();
    if open.is_empty() {
        return None;
    }

    if let Some(pos) = line_completion(board, Player::O, &open) {
        debug!(pos, "Taking winning square");
        return Some(pos);
    }

    if let Some(pos) = line_completion(board, Player::X, &open) {
        debug!(pos, "Blocking opponent's winning square");
        return Some(pos);
    }

    let pos = open.choose(rng).copied();
    debug!(?pos, "No tactical square, choosing at random");
    pos
}

/// First empty square (ascending) where placing `player` completes a line.
fn line_completion(board: &Board, player: Player, open: &[usize]) -> Option<usize> {
    open.iter().copied().find(|&pos| {
        let mut trial = board.clone();
        trial.set(pos, Square::Occupied(player));
        rules::check_winner(&trial) == Some(player)
    })
}
