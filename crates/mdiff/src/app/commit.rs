use super::{App, Mode, StatusMessage};
use crossterm::event::{KeyCode, KeyEvent};
use mdiff_core::{CommitOutcome, Document, MergeDecision, SessionError};

/// `[path] encoding terminator`, as shown in the commit prompt
fn describe(document: &Document) -> String {
    format!(
        "[{}] {} {}",
        document.path().display(),
        document.encoding().name(),
        document.line_ending().label()
    )
}

impl App {
    /// Lines of the commit prompt
    pub fn commit_prompt(&self) -> [String; 3] {
        [
            format!("src: {}", describe(self.session.master())),
            format!("dst: {}", describe(self.session.current_target())),
            "Commit? (y/n/[a]ll)".to_string(),
        ]
    }

    pub(super) fn handle_confirm_key(&mut self, key: KeyEvent) {
        let decision = match key.code {
            KeyCode::Char('y' | 'Y') => MergeDecision::Range,
            KeyCode::Char('a' | 'A') => MergeDecision::All,
            KeyCode::Char('n' | 'N' | 'q' | 'Q') | KeyCode::Esc => MergeDecision::Skip,
            _ => return,
        };
        self.mode = Mode::Normal;
        self.apply_decision(decision);
    }

    /// Commit the master into the current target; the cursor stays put
    pub fn apply_decision(&mut self, decision: MergeDecision) {
        let result = self.session.commit(decision, &self.viewport);
        self.finish_commit(result);
    }

    pub(super) fn finish_commit(&mut self, result: Result<CommitOutcome, SessionError>) {
        match result {
            Ok(CommitOutcome::Skipped) => {
                self.status = Some(StatusMessage::info("Commit skipped"));
            }
            Ok(CommitOutcome::Written { lines, bytes }) => {
                self.refresh();
                self.status = Some(StatusMessage::info(format!(
                    "Wrote {} lines ({} bytes) to {}",
                    lines,
                    bytes,
                    self.session.current_target().display_name()
                )));
            }
            Err(e @ SessionError::Reload { .. }) => {
                // Disk no longer matches the view
                tracing::error!(error = %e, "reload after commit failed");
                self.refresh();
                self.status = Some(StatusMessage::error(e.to_string()));
            }
            Err(e) => {
                tracing::error!(error = %e, "commit failed");
                self.status = Some(StatusMessage::error(e.to_string()));
            }
        }
    }
}
