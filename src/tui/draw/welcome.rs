//! Welcome screen: profile heading, intro text, suggested questions.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::super::app::App;
use super::super::text::{plain_to_lines, truncate_with_ellipsis};

/// Max width of the centered welcome column.
const WELCOME_WIDTH: u16 = 72;

pub(crate) fn draw_welcome(f: &mut Frame, app: &mut App, area: Rect) {
    let palette = app.palette();
    let info = app.info();
    let width = WELCOME_WIDTH.min(area.width);
    let column = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y,
        width,
        height: area.height,
    };
    let text_width = width as usize;

    let mut lines: Vec<Line<'static>> = vec![
        Line::default(),
        Line::from(Span::styled(
            info.welcome_heading.clone(),
            Style::default()
                .fg(palette.strong)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    lines.extend(plain_to_lines(
        &info.welcome_text,
        text_width,
        Style::default().fg(palette.text),
    ));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Try asking (Tab to choose, Enter to send):",
        Style::default().fg(palette.muted),
    )));
    lines.push(Line::default());

    for (i, question) in info.questions.iter().enumerate() {
        let label = truncate_with_ellipsis(question, text_width.saturating_sub(4));
        let line = if i == app.selected_suggestion {
            Line::from(vec![
                Span::styled("▸ ", Style::default().fg(palette.accent)),
                Span::styled(
                    format!(" {} ", label),
                    Style::default().fg(palette.selected_fg).bg(palette.accent),
                ),
            ])
        } else {
            Line::from(vec![
                Span::raw("  "),
                Span::styled(format!(" {} ", label), Style::default().fg(palette.muted)),
            ])
        };
        lines.push(line);
    }

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Left), column);
}
