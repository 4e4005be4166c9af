//! Conversation state: the message list and request lifecycle shared by the
//! TUI and single prompt mode.
//!
//! All mutation goes through [`Conversation`]; renderers only read from it.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::api::{ApiError, ChatReply, Source};
use crate::core::chart::{ChartSpec, ViewMode};
use crate::core::reply::{self, DisplayBlock};

const CANCELLED_TEXT: &str = "Request cancelled.";

pub(crate) fn unix_timestamp_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_else(|e| {
            log::warn!("System time before UNIX epoch: {}", e);
            0
        })
}

/// Author of a chat entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a conversation, as displayed and persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSpec>,
    /// Projection currently shown for `chart`.
    #[serde(default)]
    pub view_mode: ViewMode,
    /// Set on the entry appended when a request fails.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

impl ChatEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            sources: Vec::new(),
            chart: None,
            view_mode: ViewMode::default(),
            is_error: false,
            timestamp: Some(unix_timestamp_secs()),
        }
    }

    pub fn assistant(reply: ChatReply) -> Self {
        let view_mode = reply
            .chart
            .as_ref()
            .map(|c| c.kind.default_view())
            .unwrap_or_default();
        Self {
            role: Role::Assistant,
            text: reply.text,
            sources: reply.sources,
            chart: reply.chart,
            view_mode,
            is_error: false,
            timestamp: Some(unix_timestamp_secs()),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            sources: Vec::new(),
            chart: None,
            view_mode: ViewMode::default(),
            is_error: true,
            timestamp: Some(unix_timestamp_secs()),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Display blocks of the entry text.
    pub fn blocks(&self) -> Vec<DisplayBlock> {
        reply::parse(&self.text)
    }
}

/// Text of the entry appended when a request fails.
pub fn error_text(e: &ApiError) -> String {
    format!("Sorry, I encountered an error: {}. Please try again.", e)
}

fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// A conversation with the assistant.
#[derive(Debug, Clone)]
pub struct Conversation {
    /// History id once saved; `None` for a new unsaved conversation.
    id: Option<String>,
    /// Id sent to the server with each message.
    session_id: String,
    entries: Vec<ChatEntry>,
    loading: bool,
    dirty: bool,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            id: None,
            session_id: new_session_id(),
            entries: Vec::new(),
            loading: false,
            dirty: false,
        }
    }

    /// Rebuild a conversation loaded from history.
    pub fn restore(id: String, session_id: Option<String>, entries: Vec<ChatEntry>) -> Self {
        Self {
            id: Some(id),
            session_id: session_id.unwrap_or_else(new_session_id),
            entries,
            loading: false,
            dirty: false,
        }
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Start a send. Returns the message to send, or `None` when the text is
    /// blank or a request is already in flight.
    pub fn begin_send(&mut self, text: &str) -> Option<String> {
        if text.trim().is_empty() || self.loading {
            return None;
        }
        self.entries.push(ChatEntry::user(text));
        self.loading = true;
        self.dirty = true;
        Some(text.to_string())
    }

    /// Finish the in-flight request with its result.
    pub fn complete(&mut self, result: Result<ChatReply, ApiError>) {
        let entry = match result {
            Ok(reply) => {
                if let Some(ref sid) = reply.session_id
                    && *sid != self.session_id
                {
                    log::debug!("Server assigned session id {}", sid);
                    self.session_id = sid.clone();
                }
                ChatEntry::assistant(reply)
            }
            Err(ApiError::Cancelled) => ChatEntry::error(CANCELLED_TEXT),
            Err(e) => {
                log::error!("Send message error: {}", e);
                ChatEntry::error(error_text(&e))
            }
        };
        self.entries.push(entry);
        self.loading = false;
        self.dirty = true;
    }

    /// Start over with an empty conversation and a new session id.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Index of the most recent entry carrying a chart.
    pub fn last_chart_index(&self) -> Option<usize> {
        self.entries.iter().rposition(|e| e.chart.is_some())
    }

    /// Rotate the view mode of the chart at `index`. Returns the new mode.
    pub fn cycle_view(&mut self, index: usize) -> Option<ViewMode> {
        let entry = self.entries.get_mut(index).filter(|e| e.chart.is_some())?;
        entry.view_mode = entry.view_mode.next();
        self.dirty = true;
        Some(entry.view_mode)
    }
}
