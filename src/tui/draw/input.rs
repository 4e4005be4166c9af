//! Input field and bottom shortcut bar.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::super::app::App;
use super::super::shortcuts::labels;

/// Draw the input block and set the cursor position.
pub(crate) fn draw_input(f: &mut Frame, app: &mut App, area: Rect) {
    let palette = app.palette();
    let border_color = if app.is_loading() {
        palette.border
    } else {
        palette.accent
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);

    let width = inner.width as usize;
    let input_width = textwrap::core::display_width(&app.input);
    let content = if app.input.is_empty() {
        Span::styled(app.info().placeholder.clone(), Style::default().fg(palette.muted))
    } else if input_width >= width && width > 1 {
        // Keep the tail visible while typing past the edge.
        let tail: String = app
            .input
            .chars()
            .rev()
            .scan(0usize, |acc, c| {
                *acc += textwrap::core::display_width(c.encode_utf8(&mut [0; 4]));
                (*acc < width).then_some(c)
            })
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        Span::styled(tail, Style::default().fg(palette.text))
    } else {
        Span::styled(app.input.clone(), Style::default().fg(palette.text))
    };
    f.render_widget(Paragraph::new(Line::from(content)).block(block), area);

    if !app.is_loading() && app.history_selector.is_none() {
        let offset = input_width.min(width.saturating_sub(1)) as u16;
        f.set_cursor_position(Position::new(inner.x + offset, inner.y));
    }
}

pub(crate) fn draw_bottom_bar(f: &mut Frame, app: &mut App, area: Rect) {
    let palette = app.palette();
    f.render_widget(
        Paragraph::new(labels::bottom_bar(app.is_loading(), palette.muted)),
        area,
    );
}
