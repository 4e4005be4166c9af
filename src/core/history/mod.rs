//! Persistence of conversation history in ~/.local/share/analysis-assistant/conversations/.

mod index;
mod storage;

pub use index::{
    ConversationMeta, filter_conversations, filter_conversations_with_content, list_conversations,
};

use std::io;

use uuid::Uuid;

use crate::core::config::Config;
use crate::core::session::{ChatEntry, Conversation, unix_timestamp_secs};

/// Title length used when a conversation is first saved.
pub const TITLE_MAX_LEN: usize = 50;

/// Generate title from first user message. Truncates to max_len chars with ellipsis.
pub fn first_message_preview(entries: &[ChatEntry], max_len: usize) -> String {
    let Some(entry) = entries
        .iter()
        .find(|e| e.is_user() && !e.text.trim().is_empty())
    else {
        return "(No title)".to_string();
    };
    let s = entry.text.trim().replace('\n', " ");
    if s.chars().count() <= max_len {
        return s;
    }
    let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
    format!("{}…", truncated)
}

/// Load a conversation by ID.
pub fn load_conversation(id: &str) -> Option<Conversation> {
    let entries = storage::read_conv_entries(id)?;
    let session_id = index::find(id).ok().flatten().and_then(|m| m.session_id);
    Some(Conversation::restore(id.to_string(), session_id, entries))
}

/// Load concatenated message text from a conversation for full-text search.
/// Returns None if the conversation cannot be loaded.
pub fn load_conversation_searchable_content(id: &str) -> Option<String> {
    let entries = storage::read_conv_entries(id)?;
    let parts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
    Some(parts.join("\n"))
}

/// Save a conversation. Creates or updates; an existing title is kept.
/// Returns the conversation ID.
pub fn save_conversation(conversation: &Conversation, config: &Config) -> io::Result<String> {
    let entries = conversation.entries();
    if entries.is_empty() {
        if let Some(existing_id) = conversation.id() {
            return Ok(existing_id.to_string());
        }
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Cannot save empty conversation",
        ));
    }

    storage::ensure_data_dir()?;
    let now = unix_timestamp_secs();
    let conv_id = conversation
        .id()
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    storage::write_conv_file(&conv_id, entries)?;

    let existing = match conversation.id() {
        Some(id) => index::find(id)?,
        None => None,
    };
    let (title, created_at) = match existing {
        Some(meta) => (meta.title, meta.created_at),
        None => (first_message_preview(entries, TITLE_MAX_LEN), now),
    };

    let meta = ConversationMeta {
        id: conv_id.clone(),
        title,
        created_at,
        updated_at: now,
        session_id: Some(conversation.session_id().to_string()),
        profile: config.profile,
    };

    index::add_or_update(meta)?;
    index::prune(config)?;
    Ok(conv_id)
}

/// Rename a conversation by ID. Updates only the title in the index.
pub fn rename_conversation(id: &str, new_title: &str) -> io::Result<()> {
    let new_title = new_title.trim();
    if new_title.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Title cannot be empty",
        ));
    }
    if !index::update_title(id, new_title)? {
        return Err(not_found(id));
    }
    Ok(())
}

/// Delete a conversation by ID. Removes the file and index entry.
pub fn delete_conversation(id: &str) -> io::Result<()> {
    storage::remove_conv_file(id)?;
    if !index::remove(id)? {
        return Err(not_found(id));
    }
    Ok(())
}

/// Drop expired conversations and any beyond the configured maximum.
/// Returns the number of conversations removed.
pub fn prune(config: &Config) -> io::Result<usize> {
    index::prune(config)
}

fn not_found(id: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("No conversation with id {}", id),
    )
}
