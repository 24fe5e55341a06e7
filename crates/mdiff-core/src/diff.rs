//! Line-level alignment of master against a target

use crate::document::Document;
use imara_diff::{Algorithm, Diff, InternedInput, TokenSource};

/// Tag of a line in an alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    /// Present in both master and target
    Unchanged,
    /// Present only in the target
    Added,
    /// Present only in the master
    Removed,
    /// Raw line without a diff marker. Never produced by [`align`]; kept so
    /// the column splitter can reproduce how unmarked lines used to render.
    Untagged,
}

/// One tagged unit of an alignment result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub tag: DiffTag,
    pub text: String,
}

impl DiffLine {
    pub fn new(tag: DiffTag, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
        }
    }

    pub fn unchanged(text: impl Into<String>) -> Self {
        Self::new(DiffTag::Unchanged, text)
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self::new(DiffTag::Added, text)
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self::new(DiffTag::Removed, text)
    }
}

/// Pre-split lines fed to the differ, one token per line
struct Lines<'a>(&'a [String]);

impl<'a> TokenSource for Lines<'a> {
    type Token = &'a str;
    type Tokenizer = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn tokenize(&self) -> Self::Tokenizer {
        self.0.iter().map(String::as_str as fn(&'a String) -> &'a str)
    }

    fn estimate_tokens(&self) -> u32 {
        self.0.len() as u32
    }
}

/// Align `master` against `target`.
///
/// Returns an empty vector when the inputs are identical. Within each hunk
/// the removed master lines come before the added target lines.
pub fn align(master: &[String], target: &[String]) -> Vec<DiffLine> {
    if master == target {
        return Vec::new();
    }

    let input = InternedInput::new(Lines(master), Lines(target));
    let diff = Diff::compute(Algorithm::Myers, &input);

    let mut lines = Vec::with_capacity(master.len().max(target.len()));
    let mut pos = 0usize;
    for hunk in diff.hunks() {
        let before = hunk.before.start as usize..hunk.before.end as usize;
        let after = hunk.after.start as usize..hunk.after.end as usize;

        lines.extend(master[pos..before.start].iter().map(DiffLine::unchanged));
        lines.extend(master[before.clone()].iter().map(DiffLine::removed));
        lines.extend(target[after].iter().map(DiffLine::added));
        pos = before.end;
    }
    lines.extend(master[pos..].iter().map(DiffLine::unchanged));
    lines
}

/// Neutral view of the master alone, shown in place of an empty alignment.
///
/// Always has at least one row, so an empty master still draws a blank line.
pub fn identical_view(master: &[String]) -> Vec<DiffLine> {
    if master.is_empty() {
        return vec![DiffLine::unchanged("")];
    }
    master.iter().map(DiffLine::unchanged).collect()
}

/// Alignment of one master/target pair ready for display
#[derive(Debug, Clone)]
pub struct Comparison {
    pub lines: Vec<DiffLine>,
    /// True when master and target have the same content
    pub identical: bool,
}

impl Comparison {
    pub fn insertions(&self) -> usize {
        self.count(DiffTag::Added)
    }

    pub fn deletions(&self) -> usize {
        self.count(DiffTag::Removed)
    }

    fn count(&self, tag: DiffTag) -> usize {
        self.lines.iter().filter(|line| line.tag == tag).count()
    }
}

/// Compare two documents on their content lines
pub fn compare(master: &Document, target: &Document) -> Comparison {
    let lines = align(master.content_lines(), target.content_lines());
    if lines.is_empty() {
        Comparison {
            lines: identical_view(master.content_lines()),
            identical: true,
        }
    } else {
        Comparison {
            lines,
            identical: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(s: &[&str]) -> Vec<String> {
        s.iter().map(|l| l.to_string()).collect()
    }

    fn texts(diff: &[DiffLine], keep: &[DiffTag]) -> Vec<String> {
        diff.iter()
            .filter(|l| keep.contains(&l.tag))
            .map(|l| l.text.clone())
            .collect()
    }

    fn assert_laws(master: &[String], target: &[String]) {
        let diff = align(master, target);
        if master == target {
            assert!(diff.is_empty());
            return;
        }
        assert_eq!(
            texts(&diff, &[DiffTag::Unchanged, DiffTag::Removed]),
            master
        );
        assert_eq!(texts(&diff, &[DiffTag::Unchanged, DiffTag::Added]), target);
    }

    #[test]
    fn test_identical_is_sentinel() {
        let a = lines(&["a", "b"]);
        assert!(align(&a, &a).is_empty());
        assert!(align(&[], &[]).is_empty());
    }

    #[test]
    fn test_simple_substitution() {
        let diff = align(&lines(&["a", "b", "c"]), &lines(&["a", "x", "c"]));
        assert_eq!(
            diff,
            vec![
                DiffLine::unchanged("a"),
                DiffLine::removed("b"),
                DiffLine::added("x"),
                DiffLine::unchanged("c"),
            ]
        );
    }

    #[test]
    fn test_concatenation_laws() {
        let cases: Vec<(Vec<String>, Vec<String>)> = vec![
            (lines(&[]), lines(&["a", "b"])),
            (lines(&["a", "b"]), lines(&[])),
            (lines(&["a", "b", "c", "d"]), lines(&["b", "d", "e"])),
            (lines(&["", "", "x"]), lines(&["x", "", ""])),
            (
                lines(&["fn main() {", "    one();", "}", ""]),
                lines(&["fn main() {", "    one();", "    two();", "}"]),
            ),
            (lines(&["same", "same", "same"]), lines(&["same"])),
        ];
        for (master, target) in cases {
            assert_laws(&master, &target);
        }
    }

    #[test]
    fn test_compare_substitutes_identical_view() {
        let master = Document::from_bytes("m.txt", b"a\nb\n".to_vec());
        let target = Document::from_bytes("t.txt", b"a\r\nb\r\n".to_vec());
        let cmp = compare(&master, &target);
        assert!(cmp.identical);
        assert_eq!(
            cmp.lines,
            vec![DiffLine::unchanged("a"), DiffLine::unchanged("b")]
        );
    }

    #[test]
    fn test_identical_empty_files_still_show_a_row() {
        let master = Document::from_bytes("m.txt", Vec::new());
        let target = Document::from_bytes("t.txt", Vec::new());
        let cmp = compare(&master, &target);
        assert!(cmp.identical);
        assert_eq!(cmp.lines, vec![DiffLine::unchanged("")]);

        let view = crate::columns::split(&cmp.lines);
        assert_eq!(view.left.len(), 1);
        assert_eq!(view.right.len(), 1);
        assert_eq!(view.left[0].label, "1: ");
    }

    #[test]
    fn test_mixed_terminators_split_on_dominant_one() {
        // Only the detected terminator splits; stray ones stay inside a line
        // so the file still writes back byte for byte
        let master = Document::from_bytes("m.txt", b"a\nb\nc\n".to_vec());
        let target = Document::from_bytes("t.txt", b"a\r\nb\nc\r\n".to_vec());
        assert_eq!(target.content_lines(), ["a", "b\nc"]);

        let cmp = compare(&master, &target);
        assert!(!cmp.identical);
        assert_eq!(
            cmp.lines,
            vec![
                DiffLine::unchanged("a"),
                DiffLine::removed("b"),
                DiffLine::removed("c"),
                DiffLine::added("b\nc"),
            ]
        );

        let rejoined = target.line_ending().join(target.lines());
        assert_eq!(rejoined.as_bytes(), target.raw());
    }

    #[test]
    fn test_compare_counts_changes() {
        let master = Document::from_bytes("m.txt", b"a\nb\nc\n".to_vec());
        let target = Document::from_bytes("t.txt", b"a\nx\nc\nd\n".to_vec());
        let cmp = compare(&master, &target);
        assert!(!cmp.identical);
        assert_eq!(cmp.insertions(), 2);
        assert_eq!(cmp.deletions(), 1);
    }
}
