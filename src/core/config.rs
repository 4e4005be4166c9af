//! Configuration from the environment (and `.env`, loaded in main).

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::persistence;
use crate::core::profile::Profile;

pub const DEFAULT_API_BASE: &str = "http://localhost:3001/api";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_CONVERSATIONS: u32 = 50;
const DEFAULT_SESSION_TTL_HOURS: u64 = 24 * 7;

/// Color scheme of the terminal UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("unknown theme '{}' (expected light or dark)", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the chat API (`/chat` is appended).
    pub api_base: String,
    pub profile: Profile,
    pub request_timeout: Duration,
    /// Maximum number of saved conversations; 0 keeps all.
    pub max_conversations: u32,
    /// Saved conversations older than this are pruned; `None` keeps them forever.
    pub session_ttl: Option<Duration>,
    pub theme: Theme,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {var}={value:?}: expected {expected}")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var).filter(|v| !v.trim().is_empty()) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                var,
                value,
                expected,
            }),
    }
}

/// Build configuration from a variable lookup. Unset variables take defaults;
/// set but unparsable ones are errors.
pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let api_base = lookup("ANALYSIS_API_BASE")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    let profile: Profile =
        parse_var(&lookup, "ANALYSIS_PROFILE", "financial or news")?.unwrap_or_default();

    let timeout_secs: u64 = parse_var(&lookup, "ANALYSIS_TIMEOUT_SECS", "a positive integer")?
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            var: "ANALYSIS_TIMEOUT_SECS",
            value: "0".to_string(),
            expected: "a positive integer",
        });
    }

    let max_conversations: u32 = parse_var(&lookup, "ANALYSIS_MAX_CONVERSATIONS", "an integer")?
        .unwrap_or(DEFAULT_MAX_CONVERSATIONS);

    let ttl_hours: u64 = parse_var(&lookup, "ANALYSIS_SESSION_TTL_HOURS", "an integer")?
        .unwrap_or(DEFAULT_SESSION_TTL_HOURS);
    let session_ttl = (ttl_hours > 0).then(|| Duration::from_secs(ttl_hours * 60 * 60));

    let theme: Theme = parse_var(&lookup, "ANALYSIS_THEME", "light or dark")?.unwrap_or_default();

    Ok(Config {
        api_base,
        profile,
        request_timeout: Duration::from_secs(timeout_secs),
        max_conversations,
        session_ttl,
        theme,
    })
}

/// Load configuration from the environment. Without `ANALYSIS_THEME`, the
/// theme last toggled in the TUI is used.
pub fn load() -> Result<Config, ConfigError> {
    let mut config = from_lookup(|var| env::var(var).ok())?;
    let theme_from_env = env::var("ANALYSIS_THEME")
        .ok()
        .is_some_and(|v| !v.trim().is_empty());
    if !theme_from_env && let Some(saved) = persistence::load_theme() {
        config.theme = saved;
    }
    Ok(config)
}

impl Config {
    /// Apply command-line overrides on top of the environment.
    pub fn apply_overrides(&mut self, api_base: Option<&str>, profile: Option<Profile>) {
        if let Some(base) = api_base.map(str::trim).filter(|s| !s.is_empty()) {
            self.api_base = base.to_string();
        }
        if let Some(p) = profile {
            self.profile = p;
        }
    }
}
