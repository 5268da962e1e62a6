//! Tests for the per-round state machine.

use noughts_core::{Game, GameStatus, MoveError, Player, Square, WIN_LINES};

/// Plays a line for one player with the other player answering on
/// squares that never complete anything.
fn play_line_for_x(line: [usize; 3]) -> Game {
    let mut game = Game::new();
    let mut fillers = (0..9).filter(|pos| !line.contains(pos));

    for (i, pos) in line.into_iter().enumerate() {
        game.make_move(pos).expect("X move");
        if i < 2 {
            let filler = fillers.next().expect("filler square");
            game.make_move(filler).expect("O move");
        }
    }
    game
}

#[test]
fn test_every_line_wins() {
    for line in WIN_LINES {
        let game = play_line_for_x(line);
        assert_eq!(
            game.status(),
            GameStatus::Won(Player::X),
            "line {line:?} not detected"
        );
        assert!(!game.is_active());
    }
}

#[test]
fn test_draw_on_full_board() {
    // X O X / X X O / O X O in play order.
    let mut game = Game::new();
    for pos in [0, 1, 2, 5, 3, 6, 4, 8, 7] {
        game.make_move(pos).expect("legal move");
    }
    assert_eq!(game.status(), GameStatus::Draw);
    assert!(!game.is_active());
}

#[test]
fn test_occupied_square_rejected_without_change() {
    let mut game = Game::new();
    game.make_move(4).unwrap();
    let snapshot = game.clone();

    let result = game.make_move(4);
    assert_eq!(result, Err(MoveError::SquareOccupied(4)));
    assert_eq!(game, snapshot);
    assert_eq!(game.to_move(), Player::O);
}

#[test]
fn test_out_of_bounds_rejected() {
    let mut game = Game::new();
    assert_eq!(game.make_move(9), Err(MoveError::OutOfBounds(9)));
    assert_eq!(game.history(), &[] as &[usize]);
}

#[test]
fn test_no_moves_after_terminal_state() {
    let mut game = play_line_for_x([0, 1, 2]);
    assert_eq!(game.make_move(8), Err(MoveError::GameOver));
}

#[test]
fn test_turns_alternate_starting_with_x() {
    let mut game = Game::new();
    assert_eq!(game.to_move(), Player::X);
    game.make_move(0).unwrap();
    assert_eq!(game.to_move(), Player::O);
    game.make_move(1).unwrap();
    assert_eq!(game.to_move(), Player::X);
}

#[test]
fn test_board_mark_counts_stay_balanced() {
    let mut game = Game::new();
    for pos in [0, 1, 2, 5, 3, 6, 4] {
        game.make_move(pos).expect("legal move");
        let x = game.board().count(Player::X);
        let o = game.board().count(Player::O);
        assert!(x == o || x == o + 1, "unbalanced board: {x} X vs {o} O");
    }
}

#[test]
fn test_double_line_completion_still_wins() {
    // X's last mark at 0 completes the top row and the left column at
    // once; evaluation stops at the first satisfied line either way.
    let mut game = Game::new();
    for pos in [1, 4, 2, 5, 3, 7, 6, 8, 0] {
        game.make_move(pos).expect("legal move");
    }
    assert_eq!(game.status(), GameStatus::Won(Player::X));
}

#[test]
fn test_board_exposes_marks() {
    let mut game = Game::new();
    game.make_move(4).unwrap();
    assert_eq!(game.board().get(4), Some(Square::Occupied(Player::X)));
    assert_eq!(game.board().get(0), Some(Square::Empty));
}
