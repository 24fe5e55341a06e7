use super::{App, Mode, StatusMessage};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mdiff_core::{SearchEvent, SearchPrompt, SearchStatus};

impl App {
    pub fn start_search(&mut self) {
        self.mode = Mode::Search(SearchPrompt::new());
    }

    /// Query typed so far, while the prompt is open
    pub fn search_query(&self) -> Option<&str> {
        match &self.mode {
            Mode::Search(prompt) => Some(prompt.query()),
            _ => None,
        }
    }

    pub(super) fn handle_search_key(&mut self, key: KeyEvent) {
        let Mode::Search(prompt) = &mut self.mode else {
            return;
        };

        let event = match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                SearchEvent::Char(ch)
            }
            KeyCode::Backspace => SearchEvent::Backspace,
            KeyCode::Esc => SearchEvent::Cancel,
            KeyCode::Enter => SearchEvent::Submit,
            _ => return,
        };

        match prompt.handle(event) {
            SearchStatus::Editing => {}
            SearchStatus::Cancelled => self.mode = Mode::Normal,
            SearchStatus::Submitted(query) => {
                self.mode = Mode::Normal;
                self.submit_search(&query);
            }
        }
    }

    /// Jump to the first master row containing `query`
    fn submit_search(&mut self, query: &str) {
        if query.is_empty() {
            return;
        }
        if self.viewport.search(&self.view.left, query) {
            tracing::debug!(query, row = self.viewport.offset, "search hit");
        } else {
            self.status = Some(StatusMessage::info(format!("Not found: {}", query)));
        }
    }
}
