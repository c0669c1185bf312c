//! TLIST - Terminal To-Do
//!
//! A terminal to-do list manager. Lists and tasks are saved to a local JSON
//! key-value file after every change and restored on the next start.

use std::io;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use tlist::application::{App, AppMode, TodoStore};
use tlist::config::{Cli, Config};
use tlist::infrastructure::{init_logging, FileStore, KeyValueStore, StorageAdapter};
use tlist::presentation::{render_ui, InputHandler};

/// Entry point for the tlist terminal to-do manager.
///
/// Reads the configuration, starts file logging when requested, opens the
/// data file, and runs the main event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, logging cannot start,
/// or the terminal interface fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_cli(Cli::parse())?;

    let _logger = match &config.log_dir {
        Some(dir) => Some(init_logging(config.log_level, dir)?),
        None => None,
    };

    let file_store = FileStore::open(&config.data_file);
    info!(
        "event=data_file module=main path={} writable={}",
        file_store.path().display(),
        file_store.is_writable()
    );
    let unreadable_notice = (!file_store.is_writable()).then(|| {
        format!(
            "Could not read {}; changes will not be saved",
            file_store.path().display()
        )
    });

    let store = TodoStore::open(StorageAdapter::new(file_store));
    let mut app = App::new(store);
    app.status_message = unreadable_notice;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("event=app_exit module=main status={}", if res.is_ok() { "ok" } else { "error" });

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Each key press is handled to completion, including any persist and
/// re-render it triggers, before the screen is redrawn.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend, S: KeyValueStore>(terminal: &mut Terminal<B>, app: &mut App<S>) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
