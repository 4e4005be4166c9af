//! Conversation index: metadata, listing, filtering, expiry, and index mutations.

use std::collections::HashMap;
use std::io;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::config::Config;
use crate::core::profile::Profile;
use crate::core::session::unix_timestamp_secs;

use super::storage;

/// Metadata for a conversation in the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMeta {
    pub id: String,
    pub title: String,
    pub created_at: u64,
    pub updated_at: u64,
    /// Server session the conversation was continuing when last saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub profile: Profile,
}

impl ConversationMeta {
    /// True when the conversation was last updated more than `ttl` before `now`.
    pub fn is_expired(&self, ttl: Option<Duration>, now: u64) -> bool {
        ttl.is_some_and(|ttl| now.saturating_sub(self.updated_at) > ttl.as_secs())
    }
}

/// Filter conversations by title or id (case-insensitive).
pub fn filter_conversations<'a>(
    convs: &'a [ConversationMeta],
    query: &str,
) -> Vec<&'a ConversationMeta> {
    filter_conversations_with_content(convs, query, &HashMap::new())
}

/// Like [`filter_conversations`], also matching message text from `content_by_id`.
pub fn filter_conversations_with_content<'a>(
    convs: &'a [ConversationMeta],
    query: &str,
    content_by_id: &HashMap<String, String>,
) -> Vec<&'a ConversationMeta> {
    if query.is_empty() {
        return convs.iter().collect();
    }
    let q = query.to_lowercase();
    convs
        .iter()
        .filter(|c| {
            c.title.to_lowercase().contains(&q)
                || c.id.to_lowercase().contains(&q)
                || content_by_id
                    .get(&c.id)
                    .is_some_and(|s| s.to_lowercase().contains(&q))
        })
        .collect()
}

/// List conversations that have not expired, sorted by updated_at descending.
pub fn list_conversations(config: &Config) -> io::Result<Vec<ConversationMeta>> {
    let now = unix_timestamp_secs();
    let mut index = storage::load_index()?;
    index
        .conversations
        .retain(|c| !c.is_expired(config.session_ttl, now));
    index
        .conversations
        .sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Ok(index.conversations)
}

pub(super) fn find(id: &str) -> io::Result<Option<ConversationMeta>> {
    let index = storage::load_index()?;
    Ok(index.conversations.into_iter().find(|c| c.id == id))
}

/// Add or update a conversation in the index. Removes any existing entry with the same id.
pub(super) fn add_or_update(meta: ConversationMeta) -> io::Result<()> {
    let mut index = storage::load_index()?;
    index.conversations.retain(|c| c.id != meta.id);
    index.conversations.push(meta);
    storage::save_index(&index)
}

/// Update the title of a conversation by ID. Returns false when the id is unknown.
pub(super) fn update_title(id: &str, new_title: &str) -> io::Result<bool> {
    let mut index = storage::load_index()?;
    let Some(meta) = index.conversations.iter_mut().find(|c| c.id == id) else {
        return Ok(false);
    };
    meta.title = new_title.to_string();
    storage::save_index(&index)?;
    Ok(true)
}

/// Remove a conversation from the index by ID. Returns false when the id is unknown.
pub(super) fn remove(id: &str) -> io::Result<bool> {
    let mut index = storage::load_index()?;
    let before = index.conversations.len();
    index.conversations.retain(|c| c.id != id);
    if index.conversations.len() == before {
        return Ok(false);
    }
    storage::save_index(&index)?;
    Ok(true)
}

/// Remove expired conversations, then the oldest ones beyond max_conversations.
/// Deletes conversation files and updates the index. Returns how many were removed.
pub(super) fn prune(config: &Config) -> io::Result<usize> {
    let now = unix_timestamp_secs();
    let mut index = storage::load_index()?;
    index
        .conversations
        .sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    let (expired, mut kept): (Vec<_>, Vec<_>) = index
        .conversations
        .drain(..)
        .partition(|c| c.is_expired(config.session_ttl, now));

    let max = config.max_conversations as usize;
    let mut to_remove = expired;
    if max > 0 && kept.len() > max {
        to_remove.extend(kept.drain(max..));
    }
    if to_remove.is_empty() {
        return Ok(0);
    }

    for meta in &to_remove {
        if let Err(e) = storage::remove_conv_file(&meta.id) {
            log::warn!("Failed to remove conversation file {}: {}", meta.id, e);
        }
    }
    index.conversations = kept;
    storage::save_index(&index)?;
    log::info!("Pruned {} conversation(s)", to_remove.len());
    Ok(to_remove.len())
}
