use mdiff_core::SearchPrompt;

/// What incoming keys are routed to
#[derive(Debug, Clone, Default)]
pub enum Mode {
    /// Keys go through the key table
    #[default]
    Normal,
    /// Keys edit the search query
    Search(SearchPrompt),
    /// Waiting for a commit decision
    Confirm,
    /// Help popover open; any key closes it
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// One-shot message shown in the status bar until the next command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Error,
        }
    }
}
