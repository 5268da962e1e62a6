//! Game session management: one controller per match.
//!
//! A session binds the selected mode and player names to the active
//! round and is the single entry point for the presentation layer.
//! Moves from both sides go through the same apply path, so result
//! evaluation is identical for human and computer play. Invalid input
//! produces no events rather than an error; the front end simply does
//! not react.

use crate::ai;
use crate::game::Game;
use crate::types::{GameStatus, Player};
use derive_getters::Getters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Which mark the computer plays when a session runs against it.
///
/// The human always takes X and moves first.
pub const COMPUTER_MARK: Player = Player::O;

/// Game mode, fixed for the duration of a session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum GameMode {
    /// Two humans sharing one keyboard.
    #[strum(serialize = "Two players")]
    HumanVsHuman,
    /// One human (X) against the computer (O).
    #[strum(serialize = "Versus computer")]
    HumanVsComputer,
}

/// Display names for both marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    x: String,
    o: String,
}

impl Roster {
    /// Creates a roster from both display names.
    pub fn new(x: impl Into<String>, o: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            o: o.into(),
        }
    }

    /// Roster for a match against the computer.
    pub fn versus_computer(human: impl Into<String>) -> Self {
        Self::new(human, "Computer")
    }

    /// Returns the display name bound to the given mark.
    pub fn name(&self, player: Player) -> &str {
        match player {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }
}

/// Outcome of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Player won the round.
    Winner(Player),
    /// Round ended in a draw.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the round was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "Player {} wins", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Events emitted by the session for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A mark was placed on the board.
    MoveMade {
        /// The player who moved.
        player: Player,
        /// The position played (0-8).
        position: usize,
    },
    /// The turn passed to the other player.
    TurnChanged {
        /// The player now to move.
        player: Player,
        /// That player's display name.
        name: String,
    },
    /// The round reached a terminal state.
    GameEnded {
        /// Win or draw.
        outcome: Outcome,
    },
}

/// A configured match: mode, names, and the active round.
#[derive(Debug, Clone, Getters)]
pub struct GameSession {
    /// Selected mode, fixed for the session.
    mode: GameMode,
    /// Display names for both marks.
    roster: Roster,
    /// The round in play.
    game: Game,
}

impl GameSession {
    /// Creates a session for a validated (mode, roster) pair.
    ///
    /// Name and mode validation is the setup layer's job; the session
    /// assumes both names are present. Call [`GameSession::restart`]
    /// to begin the first round and obtain the opening turn event.
    #[instrument(skip(roster))]
    pub fn configure(mode: GameMode, roster: Roster) -> Self {
        info!(%mode, "Configuring game session");
        Self {
            mode,
            roster,
            game: Game::new(),
        }
    }

    /// Starts a fresh round: cleared board, X to move.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Vec<SessionEvent> {
        info!("Restarting round");
        self.game = Game::new();
        vec![SessionEvent::TurnChanged {
            player: Player::X,
            name: self.roster.name(Player::X).to_string(),
        }]
    }

    /// Applies a move for the side whose turn it is.
    ///
    /// Returns no events when the input is rejected: round over, square
    /// occupied, position out of range, or (against the computer) it is
    /// not the human's turn.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, position: usize) -> Vec<SessionEvent> {
        if !self.game.is_active() {
            debug!(position, "Ignoring move, round is over");
            return Vec::new();
        }
        if self.mode == GameMode::HumanVsComputer && self.game.to_move() == COMPUTER_MARK {
            debug!(position, "Ignoring input during the computer's turn");
            return Vec::new();
        }
        self.advance(position)
    }

    /// Plays the computer's move if one is due.
    ///
    /// No-op unless the session runs against the computer, the round is
    /// active, and it is the computer's turn. The selected move goes
    /// through the same apply path as human moves.
    #[instrument(skip(self, rng))]
    pub fn computer_move<R: Rng>(&mut self, rng: &mut R) -> Vec<SessionEvent> {
        if !self.awaiting_computer() {
            debug!("No computer move due");
            return Vec::new();
        }
        match ai::select_move(self.game.board(), rng) {
            Some(position) => self.advance(position),
            None => Vec::new(),
        }
    }

    /// True when the round is waiting on the computer to move.
    pub fn awaiting_computer(&self) -> bool {
        self.mode == GameMode::HumanVsComputer
            && self.game.is_active()
            && self.game.to_move() == COMPUTER_MARK
    }

    fn advance(&mut self, position: usize) -> Vec<SessionEvent> {
        let player = self.game.to_move();
        match self.game.make_move(position) {
            Ok(GameStatus::InProgress) => {
                let next = self.game.to_move();
                vec![
                    SessionEvent::MoveMade { player, position },
                    SessionEvent::TurnChanged {
                        player: next,
                        name: self.roster.name(next).to_string(),
                    },
                ]
            }
            Ok(GameStatus::Won(winner)) => {
                info!(%winner, "Round won");
                vec![
                    SessionEvent::MoveMade { player, position },
                    SessionEvent::GameEnded {
                        outcome: Outcome::Winner(winner),
                    },
                ]
            }
            Ok(GameStatus::Draw) => {
                info!("Round drawn");
                vec![
                    SessionEvent::MoveMade { player, position },
                    SessionEvent::GameEnded {
                        outcome: Outcome::Draw,
                    },
                ]
            }
            Err(error) => {
                debug!(position, %error, "Move rejected");
                Vec::new()
            }
        }
    }
}
