//! Handling of chat completion results and conversation save.

use crate::core::api::{ApiError, ChatReply};
use crate::core::config::Config;
use crate::core::history;

use super::app::{App, ScrollPosition};
use super::handlers::PendingChat;

/// Save the current conversation if it has unsaved changes. Returns false when saving failed.
pub(super) fn save_conversation_if_dirty(app: &mut App, config: &Config) -> bool {
    if !app.conversation.is_dirty() || app.conversation.is_empty() {
        return true;
    }
    match history::save_conversation(&app.conversation, config) {
        Ok(id) => {
            app.conversation.set_id(id);
            app.conversation.clear_dirty();
            true
        }
        Err(e) => {
            log::error!("Failed to save conversation: {}", e);
            app.set_toast(format!("Save failed: {}", e));
            false
        }
    }
}

/// Cancel the in-flight request, if any, and close the pending turn with the
/// cancellation notice.
pub(super) fn cancel_pending(app: &mut App, pending_chat: &mut Option<PendingChat>) {
    if let Some(pc) = pending_chat.take() {
        pc.cancel_token.cancel();
    }
    if app.is_loading() {
        app.conversation.complete(Err(ApiError::Cancelled));
        app.loading_since = None;
    }
}

/// Process a chat result: append the reply or error, follow the bottom, and save.
pub(super) fn handle_chat_result(
    app: &mut App,
    result: Result<ChatReply, ApiError>,
    config: &Config,
) {
    app.conversation.complete(result);
    app.loading_since = None;
    app.scroll = ScrollPosition::Bottom;
    save_conversation_if_dirty(app, config);
}
