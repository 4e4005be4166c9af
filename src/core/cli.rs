//! CLI-only commands: config info and history management.
//!
//! These run without opening the TUI and produce plain text output.

use crate::core::config::{self, Config};
use crate::core::history;
use crate::core::paths;
use crate::core::plain;

fn exit_with(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

fn format_ttl(config: &Config) -> String {
    match config.session_ttl {
        Some(ttl) => format!("{}h", ttl.as_secs() / 3600),
        None => "never".to_string(),
    }
}

fn format_limit(max: u32) -> String {
    if max == 0 {
        "unlimited".to_string()
    } else {
        max.to_string()
    }
}

/// Run the `config` command: display paths and effective settings.
pub fn run_config(config: &Config) {
    let config_dir = paths::config_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "—".to_string());
    let cache_dir = paths::cache_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "—".to_string());
    let data_dir = paths::data_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "—".to_string());

    println!("Config:        {}", config_dir);
    println!("Cache:         {}", cache_dir);
    println!("Conversations: {}", data_dir);
    println!("API base:      {}", config.api_base);
    println!("Profile:       {}", config.profile);
    println!("Timeout:       {}s", config.request_timeout.as_secs());
    println!("Max saved:     {}", format_limit(config.max_conversations));
    println!("Session TTL:   {}", format_ttl(config));
    println!("Theme:         {}", config.theme);
}

/// Load configuration or exit with a readable message.
pub fn load_config_or_exit() -> Config {
    config::load().unwrap_or_else(|e| exit_with(e))
}

/// Run the `history list` command: list conversations with optional limit and filter.
pub fn run_history_list(config: &Config, limit: Option<usize>, filter: Option<&str>) {
    let convs = history::list_conversations(config).unwrap_or_else(|e| exit_with(e));
    let matching = history::filter_conversations(&convs, filter.unwrap_or(""));
    if matching.is_empty() {
        println!("No saved conversations.");
        return;
    }

    let take = limit.unwrap_or(matching.len());
    for c in matching.into_iter().take(take) {
        let created = format_timestamp(c.created_at);
        let updated = format_timestamp(c.updated_at);
        println!(
            "{}\t{}\t{}\t{}\t{}",
            c.id, c.profile, c.title, created, updated
        );
    }
}

/// Run the `history show` command: print a saved conversation as a transcript.
pub fn run_history_show(id: &str) {
    let Some(conversation) = history::load_conversation(id) else {
        exit_with(format!("No conversation with id {}", id));
    };
    println!(
        "{}",
        plain::render_transcript(conversation.entries(), plain::DEFAULT_WIDTH)
    );
}

/// Run the `history delete` command.
pub fn run_history_delete(id: &str) {
    history::delete_conversation(id).unwrap_or_else(|e| exit_with(e));
    println!("Deleted {}", id);
}

/// Run the `history prune` command: remove expired and excess conversations.
pub fn run_history_prune(config: &Config) {
    let removed = history::prune(config).unwrap_or_else(|e| exit_with(e));
    println!("Removed {} conversation(s)", removed);
}

pub fn format_timestamp(secs: u64) -> String {
    use chrono::{Local, TimeZone};
    let dt = Local.timestamp_opt(secs as i64, 0).single();
    dt.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| secs.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn ttl_and_limit_formatting() {
        let mut config = config::from_lookup(|_| None).expect("config");
        assert_eq!(format_ttl(&config), "168h");
        config.session_ttl = None;
        assert_eq!(format_ttl(&config), "never");
        config.session_ttl = Some(Duration::from_secs(2 * 3600));
        assert_eq!(format_ttl(&config), "2h");
        assert_eq!(format_limit(0), "unlimited");
        assert_eq!(format_limit(5), "5");
    }

    #[test]
    fn timestamp_formats_as_date_and_minutes() {
        let s = format_timestamp(1_700_000_000);
        assert_eq!(s.len(), "2023-11-14 22:13".len());
        assert!(s.starts_with("2023-11-1"));
    }
}
