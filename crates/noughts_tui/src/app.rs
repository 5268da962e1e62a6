//! Application state: the setup form and the in-game screen.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use noughts_core::{GameMode, GameSession, Outcome, Roster, SessionEvent};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

/// Which setup field currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupFocus {
    /// Mode selector row.
    Mode,
    /// Player 1 name field (X).
    NameX,
    /// Player 2 name field (O) - hidden versus the computer.
    NameO,
}

/// The setup form: mode selection and player names.
///
/// Validation lives here, before a session exists: a mode is always
/// selected, and names must be non-empty for every human seat.
#[derive(Debug, Clone)]
pub struct SetupForm {
    mode: GameMode,
    name_x: String,
    name_o: String,
    focus: SetupFocus,
    error: Option<String>,
}

/// What the setup screen wants the app to do after a key press.
pub enum SetupAction {
    /// Stay on the form.
    Continue,
    /// Leave the program.
    Quit,
    /// Form validated; hand over a configured session.
    Start(GameSession),
}

impl SetupForm {
    fn new() -> Self {
        Self {
            mode: GameMode::HumanVsComputer,
            name_x: String::new(),
            name_o: String::new(),
            focus: SetupFocus::Mode,
            error: None,
        }
    }

    /// Selected game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Player 1 name as typed so far.
    pub fn name_x(&self) -> &str {
        &self.name_x
    }

    /// Player 2 name as typed so far.
    pub fn name_o(&self) -> &str {
        &self.name_o
    }

    /// Currently focused field.
    pub fn focus(&self) -> SetupFocus {
        self.focus
    }

    /// Current validation error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn handle_key(&mut self, key: KeyEvent) -> SetupAction {
        match key.code {
            KeyCode::Esc => return SetupAction::Quit,
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Left | KeyCode::Right if self.focus == SetupFocus::Mode => {
                self.toggle_mode();
            }
            KeyCode::Enter => {
                if let Some(session) = self.start() {
                    return SetupAction::Start(session);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.focused_name_mut() {
                    field.pop();
                }
            }
            KeyCode::Char(c) => {
                match self.focused_name_mut() {
                    Some(field) if field.len() < 20 => field.push(c),
                    Some(_) => {}
                    // Space on the mode row also toggles.
                    None if c == ' ' => self.toggle_mode(),
                    None => {}
                }
            }
            _ => {}
        }
        SetupAction::Continue
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            GameMode::HumanVsComputer => GameMode::HumanVsHuman,
            GameMode::HumanVsHuman => GameMode::HumanVsComputer,
        };
        self.error = None;
    }

    fn focus_next(&mut self) {
        self.focus = match (self.focus, self.mode) {
            (SetupFocus::Mode, _) => SetupFocus::NameX,
            (SetupFocus::NameX, GameMode::HumanVsHuman) => SetupFocus::NameO,
            (SetupFocus::NameX, GameMode::HumanVsComputer) => SetupFocus::Mode,
            (SetupFocus::NameO, _) => SetupFocus::Mode,
        };
    }

    fn focus_prev(&mut self) {
        self.focus = match (self.focus, self.mode) {
            (SetupFocus::Mode, GameMode::HumanVsHuman) => SetupFocus::NameO,
            (SetupFocus::Mode, GameMode::HumanVsComputer) => SetupFocus::NameX,
            (SetupFocus::NameX, _) => SetupFocus::Mode,
            (SetupFocus::NameO, _) => SetupFocus::NameX,
        };
    }

    fn focused_name_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            SetupFocus::Mode => None,
            SetupFocus::NameX => Some(&mut self.name_x),
            SetupFocus::NameO => Some(&mut self.name_o),
        }
    }

    /// Validates the form and builds the session.
    fn start(&mut self) -> Option<GameSession> {
        let name_x = self.name_x.trim();
        if name_x.is_empty() {
            self.error = Some("Please enter a name for Player 1".to_string());
            return None;
        }

        let roster = match self.mode {
            GameMode::HumanVsComputer => Roster::versus_computer(name_x),
            GameMode::HumanVsHuman => {
                let name_o = self.name_o.trim();
                if name_o.is_empty() {
                    self.error = Some("Please enter a name for Player 2".to_string());
                    return None;
                }
                Roster::new(name_x, name_o)
            }
        };

        self.error = None;
        Some(GameSession::configure(self.mode, roster))
    }
}

/// What the game screen wants the app to do after a key press.
pub enum GameAction {
    /// Stay in the game.
    Continue,
    /// Leave the program.
    Quit,
    /// Discard the session and return to setup.
    BackToMenu,
}

/// The in-game screen: the session plus the status line derived from
/// its events.
pub struct GameScreen {
    session: GameSession,
    status: String,
    over: bool,
}

impl GameScreen {
    fn new(mut session: GameSession) -> Self {
        let opening = session.restart();
        let mut screen = Self {
            session,
            status: String::new(),
            over: false,
        };
        screen.consume(opening);
        screen
    }

    /// The session driving this screen.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Current status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// True once the round has ended.
    pub fn over(&self) -> bool {
        self.over
    }

    /// True while the round waits on the computer.
    pub fn awaiting_computer(&self) -> bool {
        self.session.awaiting_computer()
    }

    /// Plays the computer's move after the thinking pause has elapsed.
    fn tick_computer(&mut self) {
        let events = self.session.computer_move(&mut rand::thread_rng());
        self.consume(events);
    }

    fn handle_key(&mut self, key: KeyEvent) -> GameAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return GameAction::Quit,
            KeyCode::Char('m') => return GameAction::BackToMenu,
            KeyCode::Char('r') => {
                self.over = false;
                let events = self.session.restart();
                self.consume(events);
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                // Squares are labeled 1-9 on screen, 0-8 in the core.
                if let Some(digit) = c.to_digit(10) {
                    if (1..=9).contains(&digit) {
                        let events = self.session.apply_move(digit as usize - 1);
                        self.consume(events);
                    }
                }
            }
            _ => {}
        }
        GameAction::Continue
    }

    fn consume(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            match event {
                SessionEvent::MoveMade { player, position } => {
                    debug!(%player, position, "Move made");
                }
                SessionEvent::TurnChanged { name, .. } => {
                    self.status = if self.session.awaiting_computer() {
                        "Computer is thinking...".to_string()
                    } else {
                        format!("It's {name}'s turn")
                    };
                }
                SessionEvent::GameEnded { outcome } => {
                    self.over = true;
                    self.status = match outcome {
                        Outcome::Winner(player) => {
                            format!("{} has won!", self.session.roster().name(player))
                        }
                        Outcome::Draw => "Game ended in a draw!".to_string(),
                    };
                }
            }
        }
    }
}

/// Active screen.
pub enum Screen {
    /// Mode and name entry.
    Setup(SetupForm),
    /// A running match.
    Game(GameScreen),
}

/// Top-level application driving the screens.
pub struct App {
    screen: Screen,
    think_delay: Duration,
    quit: bool,
}

impl App {
    /// Creates the app on the setup screen.
    pub fn new(think_delay: Duration) -> Self {
        Self {
            screen: Screen::Setup(SetupForm::new()),
            think_delay,
            quit: false,
        }
    }

    /// Active screen, for rendering.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Runs the UI loop until the user quits.
    ///
    /// Renders, then either waits out the computer's thinking pause and
    /// plays its move, or polls the keyboard. The board only ever
    /// redraws between complete turns.
    #[instrument(skip_all)]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()>
    where
        <B as Backend>::Error: std::error::Error + Send + Sync + 'static,
    {
        info!("Entering UI loop");
        loop {
            terminal.draw(|f| crate::ui::render(f, self))?;
            if self.quit {
                info!("Leaving UI loop");
                return Ok(());
            }

            if let Screen::Game(game) = &mut self.screen {
                if game.awaiting_computer() {
                    // The status line already reads "Computer is
                    // thinking..." from the turn-changed event.
                    sleep(self.think_delay).await;
                    game.tick_computer();
                    continue;
                }
            }

            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                // Skip key release events (crossterm fires both press
                // and release).
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                self.handle_key(key);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match &mut self.screen {
            Screen::Setup(form) => match form.handle_key(key) {
                SetupAction::Start(session) => {
                    info!(mode = %session.mode(), "Starting match");
                    self.screen = Screen::Game(GameScreen::new(session));
                }
                SetupAction::Quit => self.quit = true,
                SetupAction::Continue => {}
            },
            Screen::Game(game) => match game.handle_key(key) {
                GameAction::Quit => self.quit = true,
                GameAction::BackToMenu => {
                    info!("Returning to setup");
                    self.screen = Screen::Setup(SetupForm::new());
                }
                GameAction::Continue => {}
            },
        }
    }
}
