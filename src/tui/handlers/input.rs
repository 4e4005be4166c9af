//! Handler for main input (chat input, suggestions, scroll).

use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::Arc;
use std::time::Instant;

use tokio::runtime::Runtime;

use crate::core::api::ChatClient;

use super::super::app::{App, ScrollPosition};
use super::super::constants;
use super::chat_spawn;
use super::{HandleResult, PendingChat};

/// Text to send on Enter: the typed input, or the selected suggestion on the welcome screen.
fn message_to_send(app: &App) -> Option<String> {
    let input = app.input.trim();
    if !input.is_empty() {
        return Some(input.to_string());
    }
    if app.is_welcome() {
        return app.selected_question().map(str::to_string);
    }
    None
}

/// Start a request for `app`'s pending message, if any.
fn submit(
    app: &mut App,
    client: &ChatClient,
    pending_chat: &mut Option<PendingChat>,
    rt: &Arc<Runtime>,
) {
    if pending_chat.is_some() {
        return;
    }
    let Some(text) = message_to_send(app) else {
        return;
    };
    let Some(message) = app.conversation.begin_send(&text) else {
        return;
    };
    app.input.clear();
    app.scroll = ScrollPosition::Bottom;
    app.loading_since = Some(Instant::now());
    *pending_chat = Some(chat_spawn::spawn_chat(
        rt,
        client.clone(),
        message,
        app.conversation.session_id().to_string(),
    ));
}

/// Handle main input keys (when no popup is open).
pub(crate) fn handle_main_input(
    key_code: KeyCode,
    key_modifiers: KeyModifiers,
    app: &mut App,
    client: &ChatClient,
    pending_chat: &mut Option<PendingChat>,
    rt: &Arc<Runtime>,
) -> HandleResult {
    match (key_code, key_modifiers) {
        (KeyCode::BackTab, _) | (KeyCode::Tab, KeyModifiers::SHIFT) => {
            app.select_prev_suggestion();
        }
        (KeyCode::Tab, _) => {
            app.select_next_suggestion();
        }
        (KeyCode::Enter, _) => submit(app, client, pending_chat, rt),
        (KeyCode::Backspace, _) => {
            app.input.pop();
        }
        (KeyCode::Up, _) => app.scroll_up(constants::SCROLL_LINES_SMALL),
        (KeyCode::Down, _) => app.scroll_down(constants::SCROLL_LINES_SMALL),
        (KeyCode::PageUp, _) => app.scroll_up(constants::SCROLL_LINES_PAGE),
        (KeyCode::PageDown, _) => app.scroll_down(constants::SCROLL_LINES_PAGE),
        (KeyCode::Home, KeyModifiers::CONTROL) => app.scroll = ScrollPosition::Line(0),
        (KeyCode::End, KeyModifiers::CONTROL) => app.scroll = ScrollPosition::Bottom,
        (KeyCode::Char(c), mods) => {
            // Ignore Alt+key and Ctrl+key: user likely intended a shortcut
            if !mods.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) {
                app.input.push(c);
            }
        }
        _ => {}
    }
    HandleResult::Continue
}
