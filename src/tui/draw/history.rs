//! Message list: bordered message blocks, chart panels, sources, and scrollbar.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::core::api::sources_line;
use crate::core::session::ChatEntry;

use super::super::app::App;
use super::super::constants::Palette;
use super::super::text::{blocks_to_lines, plain_to_lines};
use super::chart::chart_lines;

/// Repeat a character to fill width.
fn repeat_char(c: char, n: usize) -> String {
    std::iter::repeat_n(c, n).collect()
}

fn format_time(secs: u64) -> String {
    use chrono::{Local, TimeZone};
    Local
        .timestamp_opt(secs as i64, 0)
        .single()
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// Add one entry as a bordered block: "┌─ You 14:32 ──┐ … └──┘".
fn add_entry_block(
    lines: &mut Vec<Line<'static>>,
    entry: &ChatEntry,
    wrap_width: usize,
    palette: &Palette,
) {
    let content_width = wrap_width.saturating_sub(4).max(1);
    let (label, border_color) = if entry.is_user() {
        ("You", palette.user_border)
    } else {
        ("Assistant", palette.accent)
    };
    let border_style = Style::default().fg(border_color);

    let top_label = match entry.timestamp.map(format_time) {
        Some(t) if !t.is_empty() => format!("┌─ {} {} ", label, t),
        _ => format!("┌─ {} ", label),
    };
    let top_trail = wrap_width.saturating_sub(top_label.chars().count() + 1);
    lines.push(Line::from(Span::styled(
        format!("{}{}┐", top_label, repeat_char('─', top_trail)),
        border_style,
    )));

    let mut body = if entry.is_user() {
        plain_to_lines(
            entry.text.trim(),
            content_width,
            Style::default().fg(palette.text),
        )
    } else if entry.is_error {
        plain_to_lines(
            entry.text.trim(),
            content_width,
            Style::default().fg(palette.error),
        )
    } else {
        blocks_to_lines(&entry.blocks(), content_width, palette)
    };

    if let Some(chart) = entry.chart.as_ref().filter(|c| !c.is_empty()) {
        if !body.is_empty() {
            body.push(Line::default());
        }
        body.extend(chart_lines(
            chart,
            entry.view_mode,
            content_width as u16,
            palette,
        ));
    }

    if !entry.sources.is_empty() {
        body.push(Line::default());
        body.push(Line::from(vec![
            Span::styled(
                "Sources: ",
                Style::default()
                    .fg(palette.muted)
                    .add_modifier(Modifier::ITALIC),
            ),
            Span::styled(
                sources_line(&entry.sources),
                Style::default().fg(palette.muted),
            ),
        ]));
    }

    for line in body {
        let mut spans = vec![Span::styled("│ ", border_style)];
        spans.extend(line.spans);
        lines.push(Line::from(spans));
    }

    let bottom = format!("└{}┘", repeat_char('─', wrap_width.saturating_sub(2)));
    lines.push(Line::from(Span::styled(bottom, border_style)));
    lines.push(Line::default());
}

fn loading_line(app: &App, palette: &Palette) -> Line<'static> {
    let elapsed = app
        .loading_since
        .map(|t| t.elapsed().as_secs())
        .unwrap_or(0);
    Line::from(vec![
        Span::styled(
            format!("  {} ", app.info().loading_text),
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::ITALIC),
        ),
        Span::styled(format!("{}s", elapsed), Style::default().fg(palette.muted)),
        Span::styled("  Esc to cancel", Style::default().fg(palette.border)),
    ])
}

pub(crate) fn draw_history(f: &mut Frame, app: &mut App, history_area: Rect) {
    let palette = app.palette();
    let history_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(history_area);
    let text_area = history_chunks[0];
    let scrollbar_area = history_chunks[1];
    let wrap_width = text_area.width as usize;

    let mut lines: Vec<Line<'static>> = Vec::new();
    for entry in app.conversation.entries() {
        add_entry_block(&mut lines, entry, wrap_width, palette);
    }
    if app.is_loading() {
        lines.push(loading_line(app, palette));
    }

    let total_lines = lines.len();
    let visible = text_area.height as usize;
    let max_scroll = total_lines.saturating_sub(visible.max(1));
    app.last_max_scroll = max_scroll;
    let scroll_pos = app.scroll_line().min(max_scroll);
    let visible_lines: Vec<Line> = lines.into_iter().skip(scroll_pos).take(visible).collect();

    f.render_widget(Paragraph::new(visible_lines), text_area);

    let mut scrollbar_state = ScrollbarState::default()
        .position(scroll_pos)
        .content_length(max_scroll);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .thumb_symbol("█")
        .thumb_style(Style::default().fg(palette.accent))
        .track_symbol(Some("│"))
        .track_style(Style::default().fg(palette.border));
    f.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
}
