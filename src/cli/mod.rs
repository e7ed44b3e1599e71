//! TUI front-end entry (Ratatui + Crossterm)
//! - Picks the budget client (backend over HTTP, or a local SQLite file)
//! - Sets up the terminal and runs the event loop

use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use crate::api::{HttpClient, SqliteClient};
use crate::config::Config;

pub mod input;
pub mod state;
pub mod ui;
pub mod util;

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(config: &Config) -> Result<()> {
    let mut app = init_app(config).await?;

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app).await;
    restore_terminal()?;
    terminal.show_cursor()?;

    app.shutdown().await;
    result
}

pub async fn init_app(config: &Config) -> Result<state::App> {
    let app = match &config.database_url {
        Some(db_url) => {
            let client = SqliteClient::connect(db_url).await?;
            state::App::local(Arc::new(client))
        }
        None => {
            info!(api_url = %config.api_url, "using budget backend");
            state::App::remote(HttpClient::new(&config.api_url)?)
        }
    };
    Ok(app)
}

async fn event_loop(terminal: &mut Tui, app: &mut state::App) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // after the draw, so "Logowanie..." and "Ładowanie…" are on screen while it waits
        app.tick().await;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.quit {
            break;
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Tui> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
