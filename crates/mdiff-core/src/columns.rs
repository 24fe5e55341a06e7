//! Two independently numbered display columns from an alignment

use crate::diff::{DiffLine, DiffTag};

/// Presentation hint for a column entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineHint {
    Plain,
    /// Only in the master (left column)
    Removed,
    /// Only in the target (right column)
    Added,
}

/// A display-ready column entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLine {
    /// 1-based counter local to this column
    pub number: usize,
    pub text: String,
    pub hint: LineHint,
    /// `"{number}: {text}"` with the number right-aligned to the column width
    pub label: String,
}

/// Left (master) and right (target) columns
#[derive(Debug, Clone, Default)]
pub struct ColumnView {
    pub left: Vec<ColumnLine>,
    pub right: Vec<ColumnLine>,
    /// Width every counter is padded to
    pub number_width: usize,
}

impl ColumnView {
    /// Number of display rows (the longer column)
    pub fn total_rows(&self) -> usize {
        self.left.len().max(self.right.len())
    }
}

fn digits(mut n: usize) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

fn column_line(number: usize, width: usize, text: &str, hint: LineHint) -> ColumnLine {
    ColumnLine {
        number,
        text: text.to_string(),
        hint,
        label: format!("{:>width$}: {}", number, text, width = width),
    }
}

/// Expand an alignment into two columns.
///
/// Unchanged lines advance both counters; removed lines only the left one,
/// added lines only the right one.
pub fn split(diff: &[DiffLine]) -> ColumnView {
    let width = digits(diff.len());
    let mut view = ColumnView {
        number_width: width,
        ..ColumnView::default()
    };
    let mut left_counter = 1;
    let mut right_counter = 1;

    for line in diff {
        match line.tag {
            // Historical quirk: a marker-less empty line is dropped and does
            // not advance either counter
            DiffTag::Untagged if line.text.is_empty() => continue,
            DiffTag::Unchanged | DiffTag::Untagged => {
                view.left
                    .push(column_line(left_counter, width, &line.text, LineHint::Plain));
                view.right
                    .push(column_line(right_counter, width, &line.text, LineHint::Plain));
                left_counter += 1;
                right_counter += 1;
            }
            DiffTag::Removed => {
                view.left
                    .push(column_line(left_counter, width, &line.text, LineHint::Removed));
                left_counter += 1;
            }
            DiffTag::Added => {
                view.right
                    .push(column_line(right_counter, width, &line.text, LineHint::Added));
                right_counter += 1;
            }
        }
    }

    view
}
