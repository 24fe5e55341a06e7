//! Side-by-side master/target panes

use super::text::{fit_width, truncate_start};
use crate::app::App;
use mdiff_core::{ColumnLine, Document, LineHint};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render both panes and record the page height they allow
pub fn render_split(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Borders take one row top and bottom
    app.set_page_height(chunks[0].height.saturating_sub(2) as usize);

    let master_title = document_title("", app.session.master());
    let prefix = if app.identical {
        "No Diffs: "
    } else {
        "Exists Diffs: "
    };
    let target_title = document_title(prefix, app.session.current_target());

    render_pane(frame, app, chunks[0], &master_title, &app.view.left);
    render_pane(frame, app, chunks[1], &target_title, &app.view.right);
}

fn document_title(prefix: &str, document: &Document) -> String {
    format!(
        "{}{} [{}, {}]",
        prefix,
        document.display_name(),
        document.encoding().name(),
        document.line_ending().label()
    )
}

fn render_pane(frame: &mut Frame, app: &App, area: Rect, title: &str, column: &[ColumnLine]) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let range = app.viewport.visible_range();

    let lines: Vec<Line> = column
        .iter()
        .skip(range.start)
        .take(range.len())
        .map(|line| {
            let text = if app.line_numbers {
                &line.label
            } else {
                &line.text
            };
            Line::from(Span::styled(
                fit_width(text, inner_width),
                line_style(line.hint, app),
            ))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .title(Span::styled(
            truncate_start(title, inner_width),
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        ));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn line_style(hint: LineHint, app: &App) -> Style {
    match hint {
        LineHint::Plain => Style::default().fg(app.theme.text),
        LineHint::Removed => Style::default().fg(app.theme.diff_removed),
        LineHint::Added => Style::default().fg(app.theme.diff_added),
    }
}
