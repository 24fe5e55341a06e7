//! Scroll state over a column view and the search prompt

use crate::columns::ColumnLine;

/// First visible row and the number of rows per page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub offset: usize,
    pub page_height: usize,
}

impl Viewport {
    pub fn new(page_height: usize) -> Self {
        Self {
            offset: 0,
            page_height,
        }
    }

    /// Largest useful offset: the last row still shows something
    fn max_offset(total_rows: usize) -> usize {
        total_rows.saturating_sub(1)
    }

    pub fn page_down(&mut self, total_rows: usize) {
        self.offset = (self.offset + self.page_height).min(Self::max_offset(total_rows));
    }

    pub fn page_up(&mut self) {
        self.offset = self.offset.saturating_sub(self.page_height);
    }

    pub fn line_down(&mut self, total_rows: usize) {
        self.offset = (self.offset + 1).min(Self::max_offset(total_rows));
    }

    pub fn line_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn jump_to(&mut self, row: usize) {
        self.offset = row;
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    pub fn set_page_height(&mut self, page_height: usize) {
        self.page_height = page_height;
    }

    /// Rows `[offset, offset + page_height)`
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.page_height
    }

    /// Jump to the first row matching `query`. Returns false (and leaves the
    /// offset alone) for an empty query or no match.
    pub fn search(&mut self, column: &[ColumnLine], query: &str) -> bool {
        match find_row(column, query) {
            Some(row) => {
                self.jump_to(row);
                true
            }
            None => false,
        }
    }
}

/// First row whose label contains `query` (case-sensitive substring)
pub fn find_row(column: &[ColumnLine], query: &str) -> Option<usize> {
    if query.is_empty() {
        return None;
    }
    column.iter().position(|line| line.label.contains(query))
}

/// Input delivered to the search prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEvent {
    Char(char),
    Backspace,
    Cancel,
    Submit,
}

/// What the prompt did with an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    Editing,
    Cancelled,
    Submitted(String),
}

/// Query being typed while normal key dispatch is suspended
#[derive(Debug, Clone, Default)]
pub struct SearchPrompt {
    query: String,
}

impl SearchPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn handle(&mut self, event: SearchEvent) -> SearchStatus {
        match event {
            SearchEvent::Char(ch) => {
                self.query.push(ch);
                SearchStatus::Editing
            }
            SearchEvent::Backspace => {
                self.query.pop();
                SearchStatus::Editing
            }
            SearchEvent::Cancel => {
                self.query.clear();
                SearchStatus::Cancelled
            }
            SearchEvent::Submit => SearchStatus::Submitted(std::mem::take(&mut self.query)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::LineHint;

    fn column(labels: &[&str]) -> Vec<ColumnLine> {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| ColumnLine {
                number: i + 1,
                text: String::new(),
                hint: LineHint::Plain,
                label: label.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_page_up_never_negative() {
        let mut vp = Viewport::new(10);
        vp.offset = 4;
        vp.page_up();
        assert_eq!(vp.offset, 0);
        vp.page_up();
        assert_eq!(vp.offset, 0);
        vp.line_up();
        assert_eq!(vp.offset, 0);
    }

    #[test]
    fn test_page_down_stabilizes() {
        let mut vp = Viewport::new(10);
        for _ in 0..100 {
            vp.page_down(25);
        }
        assert_eq!(vp.offset, 24);

        vp.page_down(0);
        assert_eq!(vp.offset, 0);
    }

    #[test]
    fn test_line_navigation() {
        let mut vp = Viewport::new(3);
        vp.line_down(3);
        vp.line_down(3);
        vp.line_down(3);
        assert_eq!(vp.offset, 2);
        vp.line_up();
        assert_eq!(vp.offset, 1);
        vp.jump_to(7);
        assert_eq!(vp.offset, 7);
        vp.reset();
        assert_eq!(vp.visible_range(), 0..3);
    }

    #[test]
    fn test_search_first_match() {
        let left = column(&["1: bar", "2: foo baz", "3: qux", "4: foo"]);
        assert_eq!(find_row(&left, "foo"), Some(1));

        let mut vp = Viewport::new(2);
        assert!(vp.search(&left, "foo"));
        assert_eq!(vp.offset, 1);
    }

    #[test]
    fn test_search_miss_keeps_offset() {
        let left = column(&["1: bar", "2: foo baz", "3: qux"]);
        let mut vp = Viewport::new(2);
        vp.offset = 2;
        assert!(!vp.search(&left, "nothing"));
        assert!(!vp.search(&left, ""));
        assert!(!vp.search(&left, "FOO"));
        assert_eq!(vp.offset, 2);
    }

    #[test]
    fn test_search_prompt_editing() {
        let mut prompt = SearchPrompt::new();
        for ch in "foo x".chars() {
            assert_eq!(prompt.handle(SearchEvent::Char(ch)), SearchStatus::Editing);
        }
        prompt.handle(SearchEvent::Backspace);
        prompt.handle(SearchEvent::Backspace);
        assert_eq!(prompt.query(), "foo");
        assert_eq!(
            prompt.handle(SearchEvent::Submit),
            SearchStatus::Submitted("foo".to_string())
        );
        assert_eq!(prompt.query(), "");
    }

    #[test]
    fn test_search_prompt_cancel() {
        let mut prompt = SearchPrompt::new();
        prompt.handle(SearchEvent::Char('a'));
        assert_eq!(prompt.handle(SearchEvent::Cancel), SearchStatus::Cancelled);
        assert_eq!(prompt.query(), "");

        // Backspace on an empty query is a no-op
        assert_eq!(prompt.handle(SearchEvent::Backspace), SearchStatus::Editing);
    }
}
