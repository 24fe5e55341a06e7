//! mdiff-core - diff alignment, pagination and selective-merge engine
//!
//! Compares a master document against any number of targets, produces
//! two independently numbered columns for side-by-side display, and merges
//! master content back into a target while keeping the target's own
//! encoding and line terminators.

pub mod columns;
pub mod diff;
pub mod document;
pub mod merge;
pub mod session;
pub mod viewport;

pub use columns::{split, ColumnLine, ColumnView, LineHint};
pub use diff::{align, compare, identical_view, Comparison, DiffLine, DiffTag};
pub use document::{normalize, Document, DocumentError, LineEnding, Normalized, TextEncoding};
pub use merge::{commit, encode_lines, merge_lines, CommitOutcome, MergeDecision, MergeError};
pub use session::{Session, SessionError};
pub use viewport::{find_row, SearchEvent, SearchPrompt, SearchStatus, Viewport};
