//! TUI application state: conversation, input, scroll, suggestions, popups.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use ratatui::widgets::ListState;

use crate::core::config::Theme;
use crate::core::history::ConversationMeta;
use crate::core::profile::{Profile, ProfileInfo};
use crate::core::session::Conversation;

use super::constants::{self, Palette};

/// State for the history selector popup (Alt+H).
pub struct HistorySelectorState {
    pub conversations: Vec<ConversationMeta>,
    pub selected_index: usize,
    pub list_state: ListState,
    pub filter: String,
    /// When renaming: (conversation_id, new_title_input).
    pub renaming: Option<(String, String)>,
    /// Error loading conversations or from delete/rename.
    pub error: Option<String>,
    /// Conversation ID -> concatenated message text for full-text search.
    pub content_cache: HashMap<String, String>,
}

/// Scroll position: either a specific line index, or "at bottom" (follow new content).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPosition {
    Line(usize),
    Bottom,
}

impl Default for ScrollPosition {
    fn default() -> Self {
        Self::Line(0)
    }
}

pub struct App {
    pub(crate) conversation: Conversation,
    pub(crate) profile: Profile,
    pub(crate) theme: Theme,
    /// User input in the text field.
    pub(crate) input: String,
    pub(crate) scroll: ScrollPosition,
    pub(crate) last_max_scroll: usize,
    /// Index of the selected suggested question (Tab to cycle).
    pub(crate) selected_suggestion: usize,
    /// When set, show history selector popup (Alt+H).
    pub(crate) history_selector: Option<HistorySelectorState>,
    /// Esc was pressed; next key = Option+key (Mac terminals with "Use option as meta").
    pub(crate) escape_pending: bool,
    /// When the in-flight request started; drives the spinner.
    pub(crate) loading_since: Option<Instant>,
    /// Short status message and when it expires.
    pub(crate) toast: Option<(String, Instant)>,
}

impl App {
    pub fn new(profile: Profile, theme: Theme) -> Self {
        Self {
            conversation: Conversation::new(),
            profile,
            theme,
            input: String::new(),
            scroll: ScrollPosition::default(),
            last_max_scroll: 0,
            selected_suggestion: 0,
            history_selector: None,
            escape_pending: false,
            loading_since: None,
            toast: None,
        }
    }

    pub(crate) fn info(&self) -> &'static ProfileInfo {
        self.profile.info()
    }

    pub(crate) fn palette(&self) -> &'static Palette {
        constants::palette(self.theme)
    }

    pub(crate) fn is_welcome(&self) -> bool {
        self.conversation.is_empty()
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.conversation.is_loading()
    }

    pub(crate) fn suggestion_count(&self) -> usize {
        self.info().questions.len()
    }

    pub(crate) fn select_next_suggestion(&mut self) {
        let n = self.suggestion_count();
        if n > 0 {
            self.selected_suggestion = (self.selected_suggestion + 1) % n;
        }
    }

    pub(crate) fn select_prev_suggestion(&mut self) {
        let n = self.suggestion_count();
        if n > 0 {
            self.selected_suggestion = (self.selected_suggestion + n - 1) % n;
        }
    }

    pub(crate) fn selected_question(&self) -> Option<&'static str> {
        self.info()
            .questions
            .get(self.selected_suggestion)
            .map(String::as_str)
    }

    pub(crate) fn set_toast(&mut self, message: impl Into<String>) {
        let until = Instant::now() + Duration::from_secs(constants::TOAST_SECS);
        self.toast = Some((message.into(), until));
    }

    /// Current toast text, clearing it once expired.
    pub(crate) fn active_toast(&mut self) -> Option<&str> {
        if self
            .toast
            .as_ref()
            .is_some_and(|(_, until)| *until <= Instant::now())
        {
            self.toast = None;
        }
        self.toast.as_ref().map(|(m, _)| m.as_str())
    }

    /// Reset to a new empty conversation.
    pub(crate) fn new_conversation(&mut self) {
        self.conversation.clear();
        self.loading_since = None;
        self.scroll = ScrollPosition::default();
        self.last_max_scroll = 0;
        self.selected_suggestion = 0;
    }

    /// Replace the current conversation with one loaded from history.
    pub(crate) fn load_conversation(&mut self, conversation: Conversation) {
        self.conversation = conversation;
        self.loading_since = None;
        self.scroll = ScrollPosition::Bottom;
    }

    /// Must be called before scroll_up/scroll_down when at bottom.
    pub(crate) fn materialize_scroll(&mut self) {
        if self.scroll == ScrollPosition::Bottom {
            self.scroll = ScrollPosition::Line(self.last_max_scroll);
        }
    }

    pub(crate) fn scroll_down(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            let next = (pos + n).min(self.last_max_scroll);
            self.scroll = if next == self.last_max_scroll {
                ScrollPosition::Bottom
            } else {
                ScrollPosition::Line(next)
            };
        }
    }

    pub(crate) fn scroll_up(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            self.scroll = ScrollPosition::Line(pos.saturating_sub(n));
        }
    }

    /// Resolve scroll position to a concrete line index.
    pub(crate) fn scroll_line(&self) -> usize {
        match self.scroll {
            ScrollPosition::Line(n) => n.min(self.last_max_scroll),
            ScrollPosition::Bottom => self.last_max_scroll,
        }
    }
}
