//! Mutable game state machine for a single round.

use crate::rules;
use crate::types::{Board, GameStatus, Player, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Error that can occur when applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The position is outside the 0-8 board range.
    #[display("Position {} is out of bounds", _0)]
    OutOfBounds(usize),

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(usize),

    /// The game has already reached a terminal state.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}

/// A single round of tic-tac-toe.
///
/// Owns the board and the turn pointer. Each accepted move runs result
/// evaluation: first satisfied winning line ends the round as a win, a
/// full board with no line ends it as a draw, otherwise the turn passes
/// to the other player. X always moves first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    to_move: Player,
    status: GameStatus,
    history: Vec<usize>,
}

impl Game {
    /// Creates a new round with an empty board and X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Player::X,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player whose turn it is.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the positions played so far, in order.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Returns true while the round accepts moves.
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::InProgress
    }

    /// Applies a move for the current player and evaluates the result.
    ///
    /// On success the returned status tells whether the round continues,
    /// was won by the mover, or ended in a draw. The board is untouched
    /// on any error.
    ///
    /// # Errors
    ///
    /// Returns `GameOver` if the round already ended, `OutOfBounds` for
    /// positions past 8, and `SquareOccupied` for a taken square.
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn make_move(&mut self, pos: usize) -> Result<GameStatus, MoveError> {
        if !self.is_active() {
            return Err(MoveError::GameOver);
        }
        if pos >= 9 {
            return Err(MoveError::OutOfBounds(pos));
        }
        if !self.board.is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }

        let player = self.to_move;
        self.board.set(pos, Square::Occupied(player));
        self.history.push(pos);

        if let Some(winner) = rules::check_winner(&self.board) {
            debug!(%winner, "Round won");
            self.status = GameStatus::Won(winner);
        } else if rules::is_full(&self.board) {
            debug!("Round drawn");
            self.status = GameStatus::Draw;
        } else {
            self.to_move = player.opponent();
        }

        Ok(self.status)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
