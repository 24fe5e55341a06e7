//! Applying merge decisions and writing targets back to disk

use crate::document::{Document, LineEnding, TextEncoding};
use crate::viewport::Viewport;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("{path}: text cannot be represented in {encoding}")]
    Unencodable {
        path: PathBuf,
        encoding: &'static str,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Operator decision at the commit prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDecision {
    /// Leave the target alone
    Skip,
    /// Copy master lines for the rows currently on screen
    Range,
    /// Replace the whole target with the master
    All,
}

/// Result of a commit call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Skipped,
    Written { lines: usize, bytes: usize },
}

/// Apply `decision` to the target's lines.
///
/// `Range` overwrites rows in `viewport.visible_range()` that also exist in
/// the master. Rows past the end of the target are appended as long as
/// they continue the target directly. Returns `None` for `Skip`.
pub fn merge_lines(
    master: &[String],
    target: &[String],
    decision: MergeDecision,
    viewport: &Viewport,
) -> Option<Vec<String>> {
    match decision {
        MergeDecision::Skip => None,
        MergeDecision::All => Some(master.to_vec()),
        MergeDecision::Range => {
            let mut merged = target.to_vec();
            let end = viewport.visible_range().end.min(master.len());
            for row in viewport.offset..end {
                if row < merged.len() {
                    merged[row].clone_from(&master[row]);
                } else if row == merged.len() {
                    merged.push(master[row].clone());
                }
            }
            Some(merged)
        }
    }
}

/// Join `lines` with the target's terminator and encode them.
///
/// The last line gets no terminator, so a trailing empty sentinel becomes a
/// trailing newline and a file without one keeps none.
pub fn encode_lines(
    lines: &[String],
    encoding: TextEncoding,
    line_ending: LineEnding,
) -> Option<Vec<u8>> {
    let text = line_ending.join(lines);
    encoding.encode(&text).map(|bytes| bytes.into_owned())
}

/// Merge the master into `target` per `decision` and persist the result.
///
/// Nothing is written when encoding fails. The caller is expected to reload
/// the target from disk after a successful write.
pub fn commit(
    master: &Document,
    target: &Document,
    decision: MergeDecision,
    viewport: &Viewport,
) -> Result<CommitOutcome, MergeError> {
    let Some(merged) = merge_lines(master.lines(), target.lines(), decision, viewport) else {
        tracing::debug!(path = %target.path().display(), "commit skipped");
        return Ok(CommitOutcome::Skipped);
    };

    let bytes = encode_lines(&merged, target.encoding(), target.line_ending()).ok_or_else(|| {
        MergeError::Unencodable {
            path: target.path().to_path_buf(),
            encoding: target.encoding().name(),
        }
    })?;

    write_file(target, &bytes)?;
    tracing::info!(
        path = %target.path().display(),
        ?decision,
        lines = merged.len(),
        bytes = bytes.len(),
        "committed target"
    );

    Ok(CommitOutcome::Written {
        lines: merged.len(),
        bytes: bytes.len(),
    })
}

fn write_file(target: &Document, bytes: &[u8]) -> Result<(), MergeError> {
    let to_error = |source| MergeError::Write {
        path: target.path().to_path_buf(),
        source,
    };
    let file = std::fs::File::create(target.path()).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).map_err(to_error)?;
    writer.flush().map_err(to_error)
}
