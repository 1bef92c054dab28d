mod app;
mod config;
mod logging;
mod notify;
mod progress;
mod screen;
mod theme;
mod tick;
mod timer;
mod ui;

use crate::app::AppState;
use crate::config::{Args, Config};
use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::{io, time::{Duration, Instant}};

// Redraw cadence; the countdown itself ticks once per second.
const FRAME_RATE: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;
    let config = Config::resolve(&args)?;
    tracing::info!(theme = %config.theme, notifications = config.notifications, sound = config.sound, "starting");

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let mut app = AppState::new(&config, Instant::now());

    enable_raw_mode()?;
    let mut terminal = restore_on_error(setup_terminal, restore_terminal)?;

    let res = run(&mut terminal, &mut app);

    restore_terminal()?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        tracing::error!(error = %e, "exiting on error");
    }
    res
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Runs `setup`; if it fails, `restore` runs before the error is returned.
fn restore_on_error<T>(
    setup: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T> {
    setup().inspect_err(|e| {
        tracing::error!(error = %e, "terminal setup failed");
        if let Err(e) = restore() {
            tracing::warn!(error = %e, "failed to restore terminal");
        }
    })
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        let now = Instant::now();
        terminal.draw(|f| ui::render_ui(f, app, now))?;

        let timeout = app
            .time_until_tick(now)
            .map_or(FRAME_RATE, |d| d.min(FRAME_RATE));
        if event::poll(timeout)? {
            let ev = event::read()?;
            let size = terminal.size()?;
            if app::handle_input(ev, app, size, Instant::now()) {
                tracing::info!(announced = app.notifications_sent(), "quit requested");
                return Ok(());
            }
        }

        app.update(Instant::now());
    }
}
