//! Application state and key dispatch

use crate::config::ResolvedTheme;
use crate::keys::{Command, KeyMap};
use crossterm::event::KeyEvent;
use mdiff_core::{ColumnView, Session, Viewport};

mod commit;
mod search;
mod types;


pub use types::{Mode, StatusLevel, StatusMessage};

/// The main application state
pub struct App {
    /// Master plus targets
    pub session: Session,
    /// Columns for the current target
    pub view: ColumnView,
    /// Whether the current target matches the master
    pub identical: bool,
    /// Target-only lines in the current comparison
    pub insertions: usize,
    /// Master-only lines in the current comparison
    pub deletions: usize,
    pub viewport: Viewport,
    pub mode: Mode,
    pub keymap: KeyMap,
    pub theme: ResolvedTheme,
    /// Show column counters in front of each row
    pub line_numbers: bool,
    pub status: Option<StatusMessage>,
    /// Whether to quit
    pub should_quit: bool,
}

impl App {
    pub fn new(session: Session, keymap: KeyMap, theme: ResolvedTheme) -> Self {
        let mut app = Self {
            session,
            view: ColumnView::default(),
            identical: false,
            insertions: 0,
            deletions: 0,
            viewport: Viewport::new(0),
            mode: Mode::Normal,
            keymap,
            theme,
            line_numbers: true,
            status: None,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Re-align the current target and scroll back to the top
    pub fn refresh(&mut self) {
        let comparison = self.session.compare_current();
        self.identical = comparison.identical;
        self.insertions = comparison.insertions();
        self.deletions = comparison.deletions();
        self.view = mdiff_core::split(&comparison.lines);
        self.viewport.reset();
    }

    /// Called on every draw with the rows a pane can show
    pub fn set_page_height(&mut self, rows: usize) {
        self.viewport.set_page_height(rows);
    }

    pub fn total_rows(&self) -> usize {
        self.view.total_rows()
    }

    /// 1-based current target and target count
    pub fn target_position(&self) -> (usize, usize) {
        (self.session.cursor(), self.session.target_count())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Help => self.mode = Mode::Normal,
            Mode::Search(_) => self.handle_search_key(key),
            Mode::Confirm => self.handle_confirm_key(key),
            Mode::Normal => {
                if let Some(command) = self.keymap.command(&key) {
                    self.run(command);
                }
            }
        }
    }

    pub fn run(&mut self, command: Command) {
        self.status = None;
        tracing::trace!(?command, "dispatch");
        match command {
            Command::NextTarget => {
                self.session.next_target();
                self.refresh();
            }
            Command::PrevTarget => {
                self.session.prev_target();
                self.refresh();
            }
            Command::PageDown => self.viewport.page_down(self.view.total_rows()),
            Command::PageUp => self.viewport.page_up(),
            Command::LineDown => self.viewport.line_down(self.view.total_rows()),
            Command::LineUp => self.viewport.line_up(),
            Command::Commit => self.mode = Mode::Confirm,
            Command::Search => self.start_search(),
            Command::Help => self.mode = Mode::Help,
            Command::Quit => self.should_quit = true,
        }
    }
}
