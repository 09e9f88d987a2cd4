//! Terminal host for the Raccolta Differenziata card: loads a state snapshot, renders the
//! card on every refresh and paints it.

mod app;
mod config;
mod input;
mod source;
mod ui;

use std::{
    fs::File,
    io,
    sync::Mutex,
    time::{Duration as StdDuration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use raccolta_core::{CARD_TYPE, CardRegistry};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::{Config, LoggingConfig};
use crate::input::Action;
use crate::source::FileSource;

/// Upper bound on how long a single input poll blocks.
const POLL_INTERVAL: StdDuration = StdDuration::from_millis(250);

fn main() -> Result<()> {
    let config = Config::load()?;
    init_logging(&config.logging)?;

    // Card registration + host wiring
    let registry = CardRegistry::with_builtin();
    for card in registry.cards() {
        tracing::debug!(card_type = %card.card_type, name = %card.name, "card available");
    }
    let info = registry.card(CARD_TYPE)?.clone();
    tracing::info!(card = %info.name, snapshot = %config.source.snapshot.display(), "starting host");

    let source = FileSource::new(config.source.snapshot.clone(), config.source.language.clone());
    let mut app = App::new(info, source, config.card_value()?, config.reminders.clone());
    app.refresh();

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(
        &mut terminal,
        app,
        StdDuration::from_millis(config.ui.refresh_ms),
    );

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(&logging.file)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&logging.filter)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    refresh_every: StdDuration,
) -> Result<()> {
    let mut refreshed_at = Instant::now();
    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        let until_refresh = refresh_every.saturating_sub(refreshed_at.elapsed());
        if event::poll(until_refresh.min(POLL_INTERVAL))?
            && let CEvent::Key(key) = event::read()?
        {
            match input::handle_key_event(key, &mut app) {
                Action::Quit => break,
                Action::None => {}
                Action::Refresh => {
                    app.refresh();
                    refreshed_at = Instant::now();
                }
            }
        }

        // Host-driven re-render: pick up whatever the snapshot file holds now
        if refreshed_at.elapsed() >= refresh_every {
            app.refresh();
            refreshed_at = Instant::now();
        }
    }

    Ok(())
}
