//! TUI rendering: layout and widgets for the chat interface.

mod chart;
mod header;
mod history;
mod history_selector_popup;
mod input;
mod welcome;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::app::App;
use super::constants::INPUT_HEIGHT;

const HEADER_HEIGHT: u16 = 2;

pub(super) fn draw(f: &mut Frame, app: &mut App, area: Rect) {
    let palette = app.palette();
    f.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.text)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

    header::draw_header(f, app, chunks[0]);
    if app.is_welcome() {
        welcome::draw_welcome(f, app, chunks[1]);
    } else {
        history::draw_history(f, app, chunks[1]);
    }
    input::draw_input(f, app, chunks[2]);
    input::draw_bottom_bar(f, app, chunks[3]);

    if let Some(ref mut selector) = app.history_selector {
        history_selector_popup::draw_history_selector_popup(f, area, selector, palette);
    }

    // Toast: top right, below header. Opaque background so it's visible over history.
    if let Some(message) = app.active_toast() {
        let toast_text = format!(" {} ", message);
        let toast_width = (textwrap::core::display_width(&toast_text) as u16 + 2).min(area.width);
        let toast_area = Rect {
            x: area.x + area.width.saturating_sub(toast_width).saturating_sub(1),
            y: area.y + HEADER_HEIGHT,
            width: toast_width,
            height: 3u16.min(area.height),
        };
        f.render_widget(Clear, toast_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .style(Style::default().bg(palette.bg));
        let para = Paragraph::new(Line::from(toast_text))
            .block(block)
            .style(Style::default().fg(palette.accent).bg(palette.bg));
        f.render_widget(para, toast_area);
    }
}
