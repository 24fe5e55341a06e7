//! mdiff CLI - compare a master file against several targets and merge it in

mod app;
mod color;
mod config;
mod keys;
mod logging;
mod ui;
mod views;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use config::Config;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use keys::KeyMap;
use mdiff_core::Session;
use ratatui::prelude::*;
use std::io::{self, Stdout};
use std::path::PathBuf;

const USAGE: &str = "mdiff: Multi Diff Tool.\nusage) mdiff [Master] [Diffs...]";

#[derive(Parser, Debug)]
#[command(name = "mdiff")]
#[command(author, version, about = "Multi-file diff viewer with selective merge")]
struct Args {
    /// Master file followed by one or more target files
    #[arg(num_args = 0..)]
    paths: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.paths.len() < 2 {
        println!("{}", USAGE);
        std::process::exit(1);
    }

    let config = Config::load();
    if let Err(e) = logging::init(&config.log) {
        eprintln!("Warning: {:#}", e);
    }

    let (keymap, warnings) = KeyMap::from_config(&config.keys);
    for warning in &warnings {
        eprintln!("Warning: {}", warning);
        tracing::warn!("{}", warning);
    }

    // Load everything before touching the terminal
    let session = Session::load(&args.paths).context("Failed to load input files")?;
    tracing::info!(targets = session.target_count(), "session loaded");

    let mut app = App::new(session, keymap, config.ui.theme.resolve());
    app.line_numbers = config.ui.line_numbers;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "event loop failed");
        eprintln!("Error: {}", err);
        return Err(err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Blocks until the next event; a resize just falls through to a redraw
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            _ => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
