//! UI rendering for the TUI

use crate::app::{App, Mode, StatusLevel};
use crate::keys::Command;
use crate::views::{fit_width, render_split};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Main drawing function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Panes
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_split(frame, app, chunks[0]);
    draw_status_bar(frame, app, chunks[1]);

    match app.mode {
        Mode::Help => draw_help_popover(frame, app),
        Mode::Confirm => draw_commit_prompt(frame, app),
        Mode::Normal | Mode::Search(_) => {}
    }
}

/// Visible row range as "first-last/total"
fn row_range_text(app: &App) -> String {
    let total = app.total_rows();
    if total == 0 {
        return "0/0".to_string();
    }
    let range = app.viewport.visible_range();
    let first = range.start.min(total - 1) + 1;
    let last = range.end.min(total).max(first);
    format!("{}-{}/{}", first, last, total)
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (current, count) = app.target_position();
    let left = vec![
        Span::styled(
            " MDIFF ",
            Style::default()
                .fg(Color::Black)
                .bg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" target {}/{} ", current, count),
            Style::default().fg(app.theme.text),
        ),
    ];
    let left_width: usize = left.iter().map(|s| s.content.width()).sum();

    let right = vec![
        Span::styled(
            format!("+{}", app.insertions),
            Style::default().fg(app.theme.diff_added),
        ),
        Span::raw(" "),
        Span::styled(
            format!("-{}", app.deletions),
            Style::default().fg(app.theme.diff_removed),
        ),
        Span::styled(
            format!("  {} ", row_range_text(app)),
            Style::default().fg(app.theme.text_muted),
        ),
    ];
    let right_width: usize = right.iter().map(|s| s.content.width()).sum();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(left_width as u16),
            Constraint::Min(0),
            Constraint::Length(right_width as u16),
        ])
        .split(area);

    // Center: search prompt wins over the last status message
    let center_width = chunks[1].width as usize;
    let center = if let Some(query) = app.search_query() {
        Line::from(vec![
            Span::styled("search word: ", Style::default().fg(app.theme.text_muted)),
            Span::styled(
                fit_width(query, center_width.saturating_sub(13)),
                Style::default().fg(app.theme.text),
            ),
        ])
    } else if let Some(status) = &app.status {
        let color = match status.level {
            StatusLevel::Info => app.theme.text,
            StatusLevel::Error => app.theme.error,
        };
        Line::from(Span::styled(
            fit_width(&status.text, center_width),
            Style::default().fg(color),
        ))
    } else {
        Line::from("")
    };

    frame.render_widget(Paragraph::new(Line::from(left)), chunks[0]);
    frame.render_widget(Paragraph::new(center), chunks[1]);
    frame.render_widget(
        Paragraph::new(Line::from(right)).alignment(Alignment::Right),
        chunks[2],
    );
}

/// Centered rect of the given size, clipped to the frame
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Display form of a config key string
fn key_label(key: &str) -> String {
    match key.to_ascii_lowercase().as_str() {
        "space" => "Space".into(),
        "tab" => "Tab".into(),
        "backtab" => "S-Tab".into(),
        "backspace" => "BS".into(),
        "enter" => "Enter".into(),
        "esc" => "Esc".into(),
        "left" => "←".into(),
        "right" => "→".into(),
        "up" => "↑".into(),
        "down" => "↓".into(),
        "home" => "Home".into(),
        "pageup" => "PgUp".into(),
        "pagedown" => "PgDn".into(),
        "ctrl-c" => "^C".into(),
        _ => key.to_string(),
    }
}

fn draw_help_popover(frame: &mut Frame, app: &App) {
    let key_style = Style::default().fg(app.theme.accent);
    let label_style = Style::default().fg(app.theme.text);
    let dim_style = Style::default().fg(app.theme.text_muted);

    let help_line = |keys: String, desc: &str| -> Line {
        Line::from(vec![
            Span::styled(format!("  {:<22}", keys), key_style),
            Span::styled(desc.to_string(), label_style),
        ])
    };

    let mut lines = vec![Line::from("")];
    for command in Command::ALL {
        let keys: Vec<String> = app
            .keymap
            .keys_for(command)
            .iter()
            .map(|k| key_label(k))
            .collect();
        let keys = if keys.is_empty() {
            "(unbound)".to_string()
        } else {
            keys.join(" ")
        };
        lines.push(help_line(keys, command.description()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Press any key to close", dim_style)));

    let popup_area = centered(frame.area(), 56, lines.len() as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

fn draw_commit_prompt(frame: &mut Frame, app: &App) {
    let [src, dst, question] = app.commit_prompt();
    let text_width = [&src, &dst, &question]
        .iter()
        .map(|line| line.width())
        .max()
        .unwrap_or(0);

    let popup_area = centered(frame.area(), text_width as u16 + 4, 6);
    frame.render_widget(Clear, popup_area);
    let inner_width = popup_area.width.saturating_sub(4) as usize;

    let text_style = Style::default().fg(app.theme.text);
    let lines = vec![
        Line::from(Span::styled(format!(" {}", fit_width(&src, inner_width)), text_style)),
        Line::from(Span::styled(format!(" {}", fit_width(&dst, inner_width)), text_style)),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", question),
            Style::default()
                .fg(app.theme.warning)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let block = Block::default()
        .title(" Commit ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.warning));
    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}
