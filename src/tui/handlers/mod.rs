//! Event handlers for the TUI: keyboard and mouse.

mod chat_spawn;
mod history_selector;
mod input;
mod shortcuts;

use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use std::sync::Arc;
use std::sync::mpsc;
use tokio_util::sync::CancellationToken;

use tokio::runtime::Runtime;

use crate::core::api::{ApiError, ChatClient, ChatReply};
use crate::core::config::Config;

use super::app::App;
use super::constants;
use super::shortcuts::Shortcut;

use self::shortcuts::{ShortcutContext, handle_shortcut};

/// Receiver for a chat request in progress.
pub struct PendingChat {
    pub result_rx: mpsc::Receiver<Result<ChatReply, ApiError>>,
    /// Token to cancel the in-flight request.
    pub cancel_token: CancellationToken,
}

/// Result of handling an event: continue the loop or exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    Continue,
    Break,
}

/// True when Esc would start Option+key (escape_pending) rather than cancel or close a popup.
pub(crate) fn would_esc_start_meta_sequence(
    key: &KeyEvent,
    app: &App,
    pending_chat: &Option<PendingChat>,
) -> bool {
    Shortcut::is_escape(key) && app.history_selector.is_none() && pending_chat.is_none()
}

/// Handle a mouse event: wheel scrolls the message list.
pub fn handle_mouse(mouse: MouseEvent, app: &mut App) -> HandleResult {
    if app.history_selector.is_some() {
        return HandleResult::Continue;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_up(constants::SCROLL_LINES_SMALL),
        MouseEventKind::ScrollDown => app.scroll_down(constants::SCROLL_LINES_SMALL),
        _ => {}
    }
    HandleResult::Continue
}

/// Context for key event handling. Bundles mutable state to reduce parameter count.
pub struct HandleKeyContext<'a> {
    pub app: &'a mut App,
    pub config: &'a Arc<Config>,
    pub client: &'a ChatClient,
    pub pending_chat: &'a mut Option<PendingChat>,
    pub rt: &'a Arc<Runtime>,
}

/// Handle a key event. Returns HandleResult::Break to exit the main loop.
pub fn handle_key(key: KeyEvent, ctx: HandleKeyContext<'_>) -> HandleResult {
    let HandleKeyContext {
        app,
        config,
        client,
        pending_chat,
        rt,
    } = ctx;

    if key.kind != KeyEventKind::Press {
        return HandleResult::Continue;
    }

    // Esc+key sequence (Option as Meta on Mac terminals)
    if app.escape_pending {
        app.escape_pending = false;
        if let Some(shortcut) = Shortcut::match_key(&key, true) {
            return handle_shortcut(
                shortcut,
                ShortcutContext {
                    app,
                    config,
                    pending_chat,
                },
            );
        }
    }

    if let Some(shortcut) = Shortcut::match_key(&key, false) {
        return handle_shortcut(
            shortcut,
            ShortcutContext {
                app,
                config,
                pending_chat,
            },
        );
    }

    if app.history_selector.is_some() {
        return history_selector::handle_history_selector(key.code, key.modifiers, app);
    }

    // Esc: cancel in-flight request, else start Option+key sequence.
    if Shortcut::is_escape(&key) {
        if let Some(pc) = pending_chat.as_ref() {
            pc.cancel_token.cancel();
            return HandleResult::Continue;
        }
        app.escape_pending = true;
        return HandleResult::Continue;
    }

    input::handle_main_input(key.code, key.modifiers, app, client, pending_chat, rt)
}
