//! Handler for history selector popup (Alt+H).

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::widgets::ListState;

use crate::core::config::Config;
use crate::core::history::{self, filter_conversations_with_content};

use super::super::app::{App, HistorySelectorState};
use super::HandleResult;

/// Action to apply after handling a history selector key.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum HistorySelectorAction {
    Close,
    Load { id: String },
    Delete { id: String },
    Rename { id: String, new_title: String },
    /// No action; keep the selector open.
    Keep,
}

fn selected_id(selector: &HistorySelectorState) -> Option<String> {
    filter_conversations_with_content(
        &selector.conversations,
        &selector.filter,
        &selector.content_cache,
    )
    .get(selector.selected_index)
    .map(|meta| meta.id.clone())
}

fn clamp_selection(selector: &mut HistorySelectorState) {
    let len = filter_conversations_with_content(
        &selector.conversations,
        &selector.filter,
        &selector.content_cache,
    )
    .len();
    selector.selected_index = selector.selected_index.min(len.saturating_sub(1));
}

fn handle_rename_key(
    key_code: KeyCode,
    key_modifiers: KeyModifiers,
    selector: &mut HistorySelectorState,
) -> HistorySelectorAction {
    match key_code {
        KeyCode::Esc => selector.renaming = None,
        KeyCode::Enter => {
            if let Some((id, new_title)) = selector.renaming.take() {
                return HistorySelectorAction::Rename { id, new_title };
            }
        }
        KeyCode::Backspace => {
            if let Some((_, ref mut input)) = selector.renaming {
                input.pop();
            }
        }
        KeyCode::Char(c) if !key_modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some((_, ref mut input)) = selector.renaming {
                input.push(c);
            }
        }
        _ => {}
    }
    HistorySelectorAction::Keep
}

/// Handle key when history selector is open.
pub(crate) fn handle_history_selector_key(
    key_code: KeyCode,
    key_modifiers: KeyModifiers,
    selector: &mut HistorySelectorState,
) -> HistorySelectorAction {
    if selector.renaming.is_some() {
        return handle_rename_key(key_code, key_modifiers, selector);
    }

    let ctrl = key_modifiers.contains(KeyModifiers::CONTROL);
    match key_code {
        KeyCode::Esc => HistorySelectorAction::Close,
        KeyCode::Char('r') if ctrl => {
            if let Some(id) = selected_id(selector)
                && let Some(meta) = selector.conversations.iter().find(|c| c.id == id)
            {
                selector.renaming = Some((id, meta.title.clone()));
            }
            HistorySelectorAction::Keep
        }
        KeyCode::Delete => selected_id(selector)
            .map(|id| HistorySelectorAction::Delete { id })
            .unwrap_or(HistorySelectorAction::Keep),
        KeyCode::Char('d') if ctrl => selected_id(selector)
            .map(|id| HistorySelectorAction::Delete { id })
            .unwrap_or(HistorySelectorAction::Keep),
        KeyCode::Up => {
            selector.selected_index = selector.selected_index.saturating_sub(1);
            HistorySelectorAction::Keep
        }
        KeyCode::Down => {
            selector.selected_index += 1;
            clamp_selection(selector);
            HistorySelectorAction::Keep
        }
        KeyCode::Enter => selected_id(selector)
            .map(|id| HistorySelectorAction::Load { id })
            .unwrap_or(HistorySelectorAction::Keep),
        KeyCode::Backspace => {
            selector.filter.pop();
            clamp_selection(selector);
            HistorySelectorAction::Keep
        }
        KeyCode::Char(c) if !ctrl && !key_modifiers.contains(KeyModifiers::ALT) => {
            selector.filter.push(c);
            clamp_selection(selector);
            HistorySelectorAction::Keep
        }
        _ => HistorySelectorAction::Keep,
    }
}

/// Open the history selector. Caller must save current conversation first if dirty.
pub(crate) fn open_history_selector(config: &Config) -> HistorySelectorState {
    let (conversations, error) = match history::list_conversations(config) {
        Ok(convs) => (convs, None),
        Err(e) => {
            log::warn!("Failed to list conversations: {}", e);
            (Vec::new(), Some(e.to_string()))
        }
    };
    let content_cache: HashMap<String, String> = conversations
        .iter()
        .filter_map(|meta| {
            history::load_conversation_searchable_content(&meta.id)
                .map(|content| (meta.id.clone(), content))
        })
        .collect();
    HistorySelectorState {
        conversations,
        selected_index: 0,
        list_state: ListState::default(),
        filter: String::new(),
        renaming: None,
        error,
        content_cache,
    }
}

/// Handle key when history selector popup is open and apply the resulting action.
pub(super) fn handle_history_selector(
    key_code: KeyCode,
    modifiers: KeyModifiers,
    app: &mut App,
) -> HandleResult {
    let Some(selector) = app.history_selector.as_mut() else {
        return HandleResult::Continue;
    };
    match handle_history_selector_key(key_code, modifiers, selector) {
        HistorySelectorAction::Close => app.history_selector = None,
        HistorySelectorAction::Load { id } => match history::load_conversation(&id) {
            Some(conversation) => {
                app.load_conversation(conversation);
                app.history_selector = None;
            }
            None => selector.error = Some(format!("Could not load conversation {}", id)),
        },
        HistorySelectorAction::Delete { id } => {
            selector.error = None;
            match history::delete_conversation(&id) {
                Ok(()) => {
                    selector.conversations.retain(|c| c.id != id);
                    selector.content_cache.remove(&id);
                    clamp_selection(selector);
                    if app.conversation.id() == Some(id.as_str()) {
                        app.new_conversation();
                    }
                }
                Err(e) => selector.error = Some(format!("Delete failed: {}", e)),
            }
        }
        HistorySelectorAction::Rename { id, new_title } => {
            selector.error = None;
            match history::rename_conversation(&id, &new_title) {
                Ok(()) => {
                    if let Some(meta) = selector.conversations.iter_mut().find(|c| c.id == id) {
                        meta.title = new_title.trim().to_string();
                    }
                }
                Err(e) => selector.error = Some(format!("Rename failed: {}", e)),
            }
        }
        HistorySelectorAction::Keep => {}
    }
    HandleResult::Continue
}
