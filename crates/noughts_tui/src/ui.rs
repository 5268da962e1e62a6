//! Ratatui rendering for the setup form and the game board.

use crate::app::{App, GameScreen, Screen, SetupFocus, SetupForm};
use noughts_core::{Board, GameMode, Player, Square};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use strum::IntoEnumIterator;

/// Renders the active screen.
pub fn render(f: &mut Frame, app: &App) {
    match app.screen() {
        Screen::Setup(form) => render_setup(f, form),
        Screen::Game(game) => render_game(f, game),
    }
}

fn render_setup(f: &mut Frame, form: &SetupForm) {
    let area = center_rect(f.area(), 58, 12);
    let focused = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let unfocused = Style::default();

    let mut lines = vec![Line::raw(""), mode_line(form, focused), Line::raw("")];

    lines.push(name_line(
        "Player 1 (X)",
        form.name_x(),
        form.focus() == SetupFocus::NameX,
        focused,
        unfocused,
    ));

    // Player 2's seat belongs to the computer in versus mode; no input.
    match form.mode() {
        GameMode::HumanVsHuman => lines.push(name_line(
            "Player 2 (O)",
            form.name_o(),
            form.focus() == SetupFocus::NameO,
            focused,
            unfocused,
        )),
        GameMode::HumanVsComputer => lines.push(Line::styled(
            "  Player 2 (O): Computer",
            Style::default().fg(Color::DarkGray),
        )),
    }

    lines.push(Line::raw(""));
    if let Some(error) = form.error() {
        lines.push(Line::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red),
        ));
    } else {
        lines.push(Line::raw(""));
    }
    lines.push(Line::styled(
        "  Tab: next field   ←/→: mode   Enter: start   Esc: quit",
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Noughts & Crosses").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn mode_line(form: &SetupForm, focused: Style) -> Line<'static> {
    let mut spans = vec![Span::styled(
        "  Mode: ",
        if form.focus() == SetupFocus::Mode {
            focused
        } else {
            Style::default()
        },
    )];
    for mode in GameMode::iter() {
        let style = if mode == form.mode() {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("[{mode}] "), style));
    }
    Line::from(spans)
}

fn name_line(
    label: &str,
    value: &str,
    has_focus: bool,
    focused: Style,
    unfocused: Style,
) -> Line<'static> {
    let cursor = if has_focus { "_" } else { "" };
    Line::styled(
        format!("  {label}: {value}{cursor}"),
        if has_focus { focused } else { unfocused },
    )
}

fn render_game(f: &mut Frame, game: &GameScreen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    let status_style = if game.over() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let status = Paragraph::new(game.status().to_string())
        .style(status_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[0]);

    render_board(f, chunks[1], game.session().game().board());

    let hints = Paragraph::new("1-9: place mark   r: restart   m: menu   q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(hints, chunks[2]);
}

/// Draws the grid as five text lines; empty squares show their 1-9 key.
fn render_board(f: &mut Frame, area: Rect, board: &Board) {
    let rule = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::with_capacity(5);
    for row in 0..3 {
        if row > 0 {
            lines.push(Line::styled("───┼───┼───", rule));
        }
        let mut spans = Vec::with_capacity(5);
        for col in 0..3 {
            if col > 0 {
                spans.push(Span::styled("│", rule));
            }
            spans.push(mark_span(board, row * 3 + col));
        }
        lines.push(Line::from(spans));
    }

    let grid = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(grid, center_rect(area, 11, 5));
}

fn mark_span(board: &Board, pos: usize) -> Span<'static> {
    match board.get(pos).unwrap_or(Square::Empty) {
        Square::Empty => Span::styled(
            format!(" {} ", pos + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(Player::X) => Span::styled(
            " X ",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => Span::styled(
            " O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
