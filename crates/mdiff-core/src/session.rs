//! Master/targets session state

use crate::columns::{split, ColumnView};
use crate::diff::{compare, Comparison};
use crate::document::{Document, DocumentError};
use crate::merge::{self, CommitOutcome, MergeDecision, MergeError};
use crate::viewport::Viewport;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("need a master and at least one target, got {0} path(s)")]
    TooFewPaths(usize),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Merge(#[from] MergeError),
    /// The write went through but the file could not be read back
    #[error("wrote {lines} lines to target but reloading it failed: {source}")]
    Reload {
        lines: usize,
        bytes: usize,
        #[source]
        source: DocumentError,
    },
}

/// All documents plus the currently shown target
pub struct Session {
    /// Index 0 is the master
    documents: Vec<Document>,
    /// Current target index, always in `1..documents.len()`
    cursor: usize,
}

impl Session {
    /// Load every path. Any unreadable file fails the whole session.
    pub fn load(paths: &[PathBuf]) -> Result<Self, SessionError> {
        let documents = paths
            .iter()
            .map(Document::load)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_documents(documents)
    }

    pub fn from_documents(documents: Vec<Document>) -> Result<Self, SessionError> {
        if documents.len() < 2 {
            return Err(SessionError::TooFewPaths(documents.len()));
        }
        Ok(Self {
            documents,
            cursor: 1,
        })
    }

    pub fn master(&self) -> &Document {
        &self.documents[0]
    }

    pub fn current_target(&self) -> &Document {
        &self.documents[self.cursor]
    }

    /// Index of the current target (1-based among all documents)
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn target_count(&self) -> usize {
        self.documents.len() - 1
    }

    /// Select next target, wrapping from the last back to the first
    pub fn next_target(&mut self) {
        self.cursor += 1;
        if self.cursor == self.documents.len() {
            self.cursor = 1;
        }
    }

    /// Select previous target, wrapping from the first to the last
    pub fn prev_target(&mut self) {
        self.cursor -= 1;
        if self.cursor == 0 {
            self.cursor = self.documents.len() - 1;
        }
    }

    /// Compare master against the current target
    pub fn compare_current(&self) -> Comparison {
        compare(self.master(), self.current_target())
    }

    /// Column view for the current target
    pub fn current_view(&self) -> ColumnView {
        split(&self.compare_current().lines)
    }

    /// Merge the master into the current target and reload it from disk.
    ///
    /// The cursor never moves. A failed write leaves the in-memory target as
    /// it was. A failed reload after a good write is `SessionError::Reload`;
    /// the target then keeps its pre-commit content in memory.
    pub fn commit(
        &mut self,
        decision: MergeDecision,
        viewport: &Viewport,
    ) -> Result<CommitOutcome, SessionError> {
        let outcome = merge::commit(self.master(), self.current_target(), decision, viewport)?;
        if let CommitOutcome::Written { lines, bytes } = outcome {
            self.reload_current().map_err(|source| SessionError::Reload {
                lines,
                bytes,
                source,
            })?;
        }
        Ok(outcome)
    }

    /// Re-read the current target from disk
    pub fn reload_current(&mut self) -> Result<(), DocumentError> {
        self.documents[self.cursor].reload()
    }
}
