//! Terminal front end for noughts.
//!
//! Owns everything the core does not: the setup form, board rendering,
//! key handling, and the artificial pause before the computer moves.

#![warn(missing_docs)]

mod app;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Tic-tac-toe in the terminal: two players or versus the computer.
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Milliseconds the computer pretends to think before moving.
    #[arg(long, default_value_t = 700)]
    think_ms: u64,

    /// Log file path (tracing output goes here, not to the terminal).
    #[arg(long, default_value = "noughts_tui.log")]
    log_file: std::path::PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log to a file so tracing does not fight the TUI for the terminal.
    let log_file = std::fs::File::create(&cli.log_file)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!("Starting noughts TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = app::App::new(Duration::from_millis(cli.think_ms));
    let res = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "UI loop error");
    }
    res
}
