//! History selector popup (Alt+H).

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};

use crate::core::history::{ConversationMeta, filter_conversations_with_content};

use super::super::app::HistorySelectorState;
use super::super::constants::Palette;

fn format_conversation(meta: &ConversationMeta) -> String {
    use chrono::{Local, TimeZone};
    let date_str = Local
        .timestamp_opt(meta.updated_at as i64, 0)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| meta.updated_at.to_string());
    format!("{}  ·  {}  ·  {}", meta.title, meta.profile.as_str(), date_str)
}

fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let vertical_areas = vertical.split(area);
    let horizontal_areas = horizontal.split(vertical_areas[0]);
    horizontal_areas[0]
}

fn hint_line(pairs: &[(&'static str, &'static str)], palette: &Palette) -> Line<'static> {
    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (key, action) in pairs {
        spans.push(Span::styled(
            format!("{} ", key),
            Style::default().fg(palette.muted),
        ));
        spans.push(Span::styled(
            format!("{}  ", action),
            Style::default().fg(palette.text),
        ));
    }
    Line::from(spans)
}

pub(crate) fn draw_history_selector_popup(
    f: &mut Frame,
    area: Rect,
    selector: &mut HistorySelectorState,
    palette: &Palette,
) {
    let popup_rect = popup_area(area, 70, 60);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.bg))
        .title(" Conversations (Alt+H) ");

    let inner = block.inner(popup_rect);
    f.render_widget(Clear, popup_rect);
    f.render_widget(block, popup_rect);

    let is_renaming = selector.renaming.is_some();
    let constraints: &[Constraint] = if is_renaming {
        &[
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ]
    } else {
        &[
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);
    let filter_area = chunks[0];
    let (list_area, hint_area) = match selector.renaming.as_ref() {
        Some((_, input)) => {
            let rename_content = Line::from(vec![
                Span::styled("Rename to: ", Style::default().fg(palette.muted)),
                Span::styled(input.clone(), Style::default().fg(palette.text)),
                Span::styled("_", Style::default().fg(palette.muted)),
            ]);
            let rename_block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent));
            f.render_widget(Paragraph::new(rename_content).block(rename_block), chunks[1]);
            (chunks[2], chunks[3])
        }
        None => (chunks[1], chunks[2]),
    };

    let filter_content = if selector.filter.is_empty() {
        Span::styled("Search titles and messages... ", Style::default().fg(palette.muted))
    } else {
        Span::styled(selector.filter.clone(), Style::default().fg(palette.text))
    };
    let filter_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));
    f.render_widget(
        Paragraph::new(Line::from(filter_content)).block(filter_block),
        filter_area,
    );

    let filtered = filter_conversations_with_content(
        &selector.conversations,
        &selector.filter,
        &selector.content_cache,
    );
    selector.selected_index = selector
        .selected_index
        .min(filtered.len().saturating_sub(1));

    if let Some(ref err) = selector.error {
        let para = Paragraph::new(Line::from(Span::styled(
            format!("History error: {}", err),
            Style::default().fg(palette.error),
        )));
        f.render_widget(para, list_area);
    } else if filtered.is_empty() {
        let msg = if selector.filter.is_empty() {
            "No conversations yet"
        } else {
            "No conversations match filter"
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                msg,
                Style::default().fg(palette.muted),
            ))),
            list_area,
        );
    } else {
        let selected_style = Style::default().fg(palette.selected_fg).bg(palette.accent);
        let items: Vec<ListItem> = filtered
            .iter()
            .enumerate()
            .map(|(i, meta)| {
                let style = if i == selector.selected_index {
                    selected_style
                } else {
                    Style::default().fg(palette.text)
                };
                ListItem::new(format!(" {} ", format_conversation(meta))).style(style)
            })
            .collect();

        selector.list_state.select(Some(selector.selected_index));
        let list = List::new(items).highlight_style(selected_style);
        f.render_stateful_widget(list, list_area, &mut selector.list_state);
    }

    let hint = if is_renaming {
        hint_line(&[("Enter", "confirm"), ("Esc", "cancel")], palette)
    } else {
        hint_line(
            &[
                ("↑↓", "select"),
                ("Enter", "load"),
                ("Ctrl+R", "rename"),
                ("Delete/Ctrl+D", "delete"),
                ("Ctrl+N", "new"),
                ("Esc", "close"),
            ],
            palette,
        )
    };
    f.render_widget(Paragraph::new(hint), hint_area);
}
