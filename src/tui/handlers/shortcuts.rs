//! Shortcut key handling (History, NewConversation, CycleView, ToggleTheme, Quit).

use std::sync::Arc;

use crate::core::config::Config;
use crate::core::persistence;
use crate::tui::shortcuts::Shortcut;

use super::super::app::App;
use super::super::chat_result::{cancel_pending, save_conversation_if_dirty};
use super::history_selector;
use super::{HandleResult, PendingChat};

/// Context passed to shortcut handlers (reduces parameter count).
pub(super) struct ShortcutContext<'a> {
    pub app: &'a mut App,
    pub config: &'a Arc<Config>,
    pub pending_chat: &'a mut Option<PendingChat>,
}

pub(super) fn handle_shortcut(shortcut: Shortcut, ctx: ShortcutContext<'_>) -> HandleResult {
    let ShortcutContext {
        app,
        config,
        pending_chat,
    } = ctx;
    match shortcut {
        Shortcut::History => {
            if app.history_selector.is_some() {
                app.history_selector = None;
            } else if !app.is_loading() {
                save_conversation_if_dirty(app, config);
                app.history_selector = Some(history_selector::open_history_selector(config));
            }
        }
        Shortcut::NewConversation => {
            cancel_pending(app, pending_chat);
            save_conversation_if_dirty(app, config);
            app.history_selector = None;
            app.new_conversation();
        }
        Shortcut::CycleView => {
            if app.history_selector.is_none()
                && let Some(idx) = app.conversation.last_chart_index()
                && let Some(mode) = app.conversation.cycle_view(idx)
            {
                app.set_toast(format!("View: {}", mode.label()));
            }
        }
        Shortcut::ToggleTheme => {
            app.theme = app.theme.toggled();
            if let Err(e) = persistence::save_theme(app.theme) {
                log::warn!("Failed to save theme: {}", e);
            }
            app.set_toast(format!("Theme: {}", app.theme));
        }
        Shortcut::Quit => return HandleResult::Break,
    }
    HandleResult::Continue
}
