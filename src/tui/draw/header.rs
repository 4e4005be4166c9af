//! Header: spinner logo, profile title and subtitle, session marker, theme.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Borders, Block, Paragraph};

use super::super::app::App;
use super::super::constants::{LOGO_IDLE, LOGO_THINKING};

/// Width for the right-hand status area (session marker and theme).
const STATUS_WIDTH: u16 = 24;

fn logo_symbol(app: &App) -> &'static str {
    match app.loading_since {
        Some(start) if app.is_loading() => {
            let frame = (start.elapsed().as_millis() as usize / 80) % LOGO_THINKING.len();
            LOGO_THINKING[frame]
        }
        _ => LOGO_IDLE,
    }
}

/// "new", "saved" or "unsaved" for the current conversation.
pub(crate) fn session_marker(app: &App) -> &'static str {
    let conv = &app.conversation;
    if conv.is_dirty() {
        "unsaved"
    } else if conv.id().is_some() {
        "saved"
    } else {
        "new"
    }
}

pub(crate) fn draw_header(f: &mut Frame, app: &mut App, area: Rect) {
    let palette = app.palette();
    let info = app.info();
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(palette.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(STATUS_WIDTH)])
        .split(inner);

    let title = Line::from(vec![
        Span::styled(
            format!("{} ", logo_symbol(app)),
            Style::default().fg(palette.accent),
        ),
        Span::styled(
            info.title.clone(),
            Style::default()
                .fg(palette.strong)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", info.subtitle),
            Style::default().fg(palette.muted),
        ),
    ]);
    f.render_widget(Paragraph::new(title), chunks[0]);

    let theme_icon = match app.theme {
        crate::core::config::Theme::Light => "☀",
        crate::core::config::Theme::Dark => "☾",
    };
    let status = Line::from(vec![
        Span::styled(session_marker(app), Style::default().fg(palette.muted)),
        Span::styled(
            format!("  {} {}", theme_icon, app.theme),
            Style::default().fg(palette.accent),
        ),
    ]);
    f.render_widget(
        Paragraph::new(status).alignment(Alignment::Right),
        chunks[1],
    );
}
