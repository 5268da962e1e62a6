//! Pure tic-tac-toe game logic.
//!
//! # Architecture
//!
//! - **Types**: board, marks, and status enums shared by every layer
//! - **Rules**: win and draw evaluation over the fixed line table
//! - **Game**: the per-round state machine (board + turn pointer)
//! - **Ai**: the computer opponent's three-tier move heuristic
//! - **Session**: the controller a front end talks to, emitting
//!   turn-changed and game-ended events
//!
//! Everything here is synchronous and deterministic under an injected
//! RNG; pacing concerns such as the computer's thinking delay belong to
//! the presentation layer.
//!
//! # Example
//!
//! ```
//! use noughts_core::{GameMode, GameSession, Roster};
//!
//! let roster = Roster::versus_computer("Ada");
//! let mut session = GameSession::configure(GameMode::HumanVsComputer, roster);
//! let opening = session.restart();
//! assert!(!opening.is_empty());
//!
//! // Human (X) takes the center.
//! let events = session.apply_move(4);
//! assert_eq!(events.len(), 2);
//! assert!(session.awaiting_computer());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ai;
mod game;
mod rules;
mod session;
mod types;

pub use ai::select_move;
pub use game::{Game, MoveError};
pub use rules::{check_winner, is_full, WIN_LINES};
pub use session::{
    GameMode, GameSession, Outcome, Roster, SessionEvent, COMPUTER_MARK,
};
pub use types::{Board, GameStatus, Player, Square};
