//! Fitting raw file text into terminal cells

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const TAB_WIDTH: usize = 4;
const REPLACEMENT: char = '\u{fffd}';

/// Render `text` into at most `width` cells.
///
/// Tabs expand to the next tab stop, control characters become U+FFFD and
/// anything past `width` is cut at a grapheme boundary.
pub fn fit_width(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len().min(width * 4));
    let mut used = 0;

    for grapheme in text.graphemes(true) {
        if grapheme == "\t" {
            let stop = TAB_WIDTH - used % TAB_WIDTH;
            let fill = stop.min(width - used);
            out.extend(std::iter::repeat(' ').take(fill));
            used += fill;
        } else if grapheme.chars().any(char::is_control) {
            if used + 1 > width {
                break;
            }
            out.push(REPLACEMENT);
            used += 1;
        } else {
            let cells = UnicodeWidthStr::width(grapheme);
            if used + cells > width {
                break;
            }
            out.push_str(grapheme);
            used += cells;
        }
        if used >= width {
            break;
        }
    }

    out
}

/// Shorten a title to `width` cells, keeping the end
pub fn truncate_start(title: &str, width: usize) -> String {
    if UnicodeWidthStr::width(title) <= width {
        return title.to_string();
    }
    if width < 3 {
        return ".".repeat(width);
    }

    let budget = width - 3;
    let mut kept = Vec::new();
    let mut used = 0;
    for grapheme in title.graphemes(true).rev() {
        let cells = UnicodeWidthStr::width(grapheme);
        if used + cells > budget {
            break;
        }
        kept.push(grapheme);
        used += cells;
    }
    kept.reverse();
    format!("...{}", kept.concat())
}
